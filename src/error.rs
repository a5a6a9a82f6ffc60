//! Error types.
//!
//! - [`FitError`] is the library error: every failure of basis construction or
//!   fitting is reported synchronously through it.
//! - [`AppError`] is the binary-facing error: a message plus a process exit code.

use crate::domain::FitMethod;

/// Errors raised by basis construction and least-squares fitting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FitError {
    /// Invalid basis or plot parameters (negative degree, empty basis, bad period, ...).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The data table has no rows (M = 0).
    ///
    /// Belongs to the dimension category together with [`FitError::Dimension`];
    /// [`FitError::is_dimension`] covers both.
    #[error("No data available for fitting")]
    EmptyData,

    /// The design matrix cannot be formed with the given shape.
    #[error("Design matrix has incompatible dimensions [rows: {rows}, cols: {cols}]")]
    Dimension {
        /// Number of observations (M).
        rows: usize,
        /// Number of basis functions (N).
        cols: usize,
    },

    /// The requested solution method exists in the interface but has no implementation.
    #[error("Fit method `{0}` is not implemented")]
    UnimplementedMethod(FitMethod),

    /// An observation contains NaN or an infinity.
    #[error("Non-finite observation at row {index}")]
    NonFiniteData {
        /// Zero-based row of the offending pair.
        index: usize,
    },

    /// The SVD solve itself failed.
    #[error("Failed to solve: {0}")]
    Solver(&'static str),
}

impl FitError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Whether the error is about the shape of the data or design matrix.
    pub fn is_dimension(&self) -> bool {
        matches!(self, FitError::EmptyData | FitError::Dimension { .. })
    }

    /// Exit code used when this error reaches the binary.
    pub fn exit_code(&self) -> u8 {
        match self {
            FitError::InvalidConfig(_) | FitError::UnimplementedMethod(_) => 2,
            FitError::EmptyData | FitError::Dimension { .. } | FitError::NonFiniteData { .. } => 3,
            FitError::Solver(_) => 4,
        }
    }
}

/// Result alias for library operations.
pub type Result<T> = std::result::Result<T, FitError>;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_errors_map_to_distinct_exit_codes() {
        let config: AppError = FitError::config("degree must be >= 0").into();
        let dim: AppError = FitError::EmptyData.into();
        let unimpl: AppError = FitError::UnimplementedMethod(FitMethod::Simple).into();
        let solver: AppError = FitError::Solver("boom").into();

        assert_eq!(config.exit_code(), 2);
        assert_eq!(dim.exit_code(), 3);
        assert_eq!(unimpl.exit_code(), 2);
        assert_eq!(solver.exit_code(), 4);
        assert_eq!(unimpl.to_string(), "Fit method `simple` is not implemented");
    }

    #[test]
    fn empty_data_is_a_dimension_error() {
        assert!(FitError::EmptyData.is_dimension());
        assert!(FitError::Dimension { rows: 0, cols: 2 }.is_dimension());
        assert!(!FitError::config("x").is_dimension());
        assert!(!FitError::NonFiniteData { index: 0 }.is_dimension());
        assert_eq!(FitError::EmptyData.exit_code(), FitError::Dimension { rows: 0, cols: 1 }.exit_code());
    }
}
