//! Regression fitting.
//!
//! Responsibilities:
//!
//! - build the design matrix for a basis and solve it by SVD (`fitter`)
//! - fit several bases against one data table in parallel (`batch`)

pub mod batch;
pub mod fitter;

pub use batch::*;
pub use fitter::*;
