//! Synthetic observations for demos and tests.
//!
//! - evenly spaced samples with seeded Gaussian noise (`sample`)
//! - a sinusoidal model function (`sinusoid`)

pub mod sample;
pub mod sinusoid;

pub use sample::*;
pub use sinusoid::*;
