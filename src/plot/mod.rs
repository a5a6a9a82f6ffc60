//! Plot output for fitted curves.
//!
//! - terminal preview (`ascii`)
//! - gnuplot script + data files (`gnuplot`)

pub mod ascii;
pub mod gnuplot;

pub use ascii::*;
pub use gnuplot::*;
