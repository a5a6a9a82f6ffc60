//! Mathematical core: basis-function sets and the SVD least squares solver.

pub mod basis;
pub mod ols;

pub use basis::*;
pub use ols::*;
