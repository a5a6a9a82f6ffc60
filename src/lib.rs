//! `linreg` library crate.
//!
//! Linear least-squares regression of `(x, y)` data against a set of basis
//! functions (polynomial, Fourier, or any ordered list of callables).
//!
//! The binary (`linreg`) is a thin wrapper around this library so that:
//!
//! - the basis/fit core is testable without spawning processes
//! - the same fitter serves the sinusoid demo, CSV fitting and plotting

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
