//! Sinusoidal model function for synthetic data.

use std::f64::consts::TAU;

use crate::error::{FitError, Result};

/// `amplitude · sin(ω t + phase)` with `ω = 2π / period`.
///
/// Phase zero is the sine function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sinusoid {
    amplitude: f64,
    angfreq: f64,
    phase: f64,
}

impl Sinusoid {
    pub fn new(amplitude: f64, period: f64, phase: f64) -> Result<Self> {
        if !(period.is_finite() && period > 0.0) {
            return Err(FitError::config(format!(
                "sinusoid period must be a positive finite number, got {period}"
            )));
        }
        Ok(Self {
            amplitude,
            angfreq: TAU / period,
            phase,
        })
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn period(&self) -> f64 {
        TAU / self.angfreq
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn eval(&self, t: f64) -> f64 {
        self.amplitude * (self.angfreq * t + self.phase).sin()
    }
}
