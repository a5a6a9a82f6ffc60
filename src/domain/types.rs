//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built from CLI flags
//! - carried through the fit pipeline
//! - exported to JSON and reloaded later for plotting

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::{Basis, FourierBasis, PolynomialBasis};

/// How the least-squares coefficients are computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FitMethod {
    /// Solve the normal equations `BᵀB c = Bᵀy`.
    ///
    /// Declared but not implemented: selecting it is always an error.
    Simple,
    /// Singular value decomposition of the design matrix.
    #[default]
    Svd,
}

impl fmt::Display for FitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitMethod::Simple => write!(f, "simple"),
            FitMethod::Svd => write!(f, "svd"),
        }
    }
}

/// Standard basis families selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BasisKind {
    Polynomial,
    Fourier,
}

/// A standard basis described by configuration values.
///
/// The degree stays signed here so that a negative value coming from a user
/// is reported as a configuration error instead of being silently wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BasisSpec {
    pub kind: BasisKind,
    pub degree: i64,
    /// Fundamental period (Fourier only). `None` means `2π`.
    pub period: Option<f64>,
}

impl BasisSpec {
    pub fn polynomial(degree: i64) -> Self {
        Self {
            kind: BasisKind::Polynomial,
            degree,
            period: None,
        }
    }

    pub fn fourier(degree: i64, period: Option<f64>) -> Self {
        Self {
            kind: BasisKind::Fourier,
            degree,
            period,
        }
    }

    /// Construct the described basis behind a shared handle.
    pub fn build(&self) -> Result<Arc<dyn Basis>> {
        let basis: Arc<dyn Basis> = match self.kind {
            BasisKind::Polynomial => Arc::new(PolynomialBasis::try_from_degree(self.degree)?),
            BasisKind::Fourier => Arc::new(FourierBasis::try_from_degree(self.degree, self.period)?),
        };
        Ok(basis)
    }
}

/// Fit quality against the data the coefficients were solved on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub sse: f64,
    pub rmse: f64,
    pub n: usize,
}

/// Numerical diagnostics of the SVD solve.
///
/// A large condition number or `rank < size` is a warning, never a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitDiagnostics {
    pub singular_values: Vec<f64>,
    pub tolerance: f64,
    pub rank: usize,
    /// `None` when the smallest singular value is exactly zero.
    pub condition_number: Option<f64>,
}

/// Configuration for `linreg fit`.
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub input: PathBuf,
    pub basis: BasisSpec,
    pub method: FitMethod,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export_fit: Option<PathBuf>,
    pub gnuplot: Option<String>,
}

/// Configuration for `linreg sinusoid`.
#[derive(Debug, Clone)]
pub struct SinusoidConfig {
    /// Number of synthetic measurements.
    pub points: usize,
    pub seed: u64,
    /// Standard deviation of the Gaussian noise.
    pub sigma: f64,
    pub fourier_degree: i64,
    pub poly_degree: i64,
    pub method: FitMethod,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,

    pub export: Option<PathBuf>,
    pub gnuplot: Option<String>,
}

/// Configuration for `linreg generate`.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub amplitude: f64,
    pub period: f64,
    pub phase: f64,
    pub points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub sigma: f64,
    pub seed: u64,
    pub output: PathBuf,
}

/// A saved fit (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub basis: String,
    pub size: usize,
    pub method: FitMethod,
    pub coefficients: Vec<f64>,
    pub quality: FitQuality,
    pub diagnostics: FitDiagnostics,
    pub grid: FitGrid,
}

/// Fitted curve sampled on an even grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}
