//! Least-squares fit of one basis against one data table.
//!
//! Given:
//! - a basis with `N` functions
//! - `M` observations `(x_i, y_i)`
//!
//! we build the `M×N` design matrix `B` (row `i` is `basis(x_i)`), solve
//! `min ‖B c - y‖₂` by SVD, and keep the coefficients next to a shared handle to
//! the basis. The resulting [`Fit`] is immutable and doubles as the fitted
//! function `x ↦ c · basis(x)`.

use std::sync::Arc;

use log::{debug, warn};
use nalgebra::{DMatrix, DVector};

use crate::domain::{FitDiagnostics, FitMethod, FitQuality};
use crate::error::{FitError, Result};
use crate::math::{Basis, LeastSquares, solve_least_squares};

/// Shared, read-only basis handle.
pub type BasisPtr = Arc<dyn Basis>;

/// Options that affect how a fit is computed and what it keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FitOptions {
    pub method: FitMethod,
    /// Retain a copy of the data table inside the fit.
    pub keep_data: bool,
}

/// Coefficients of a basis fitted to data.
#[derive(Debug, Clone)]
pub struct Fit {
    basis: BasisPtr,
    coefs: DVector<f64>,
    method: FitMethod,
    data: Option<Vec<(f64, f64)>>,
    quality: FitQuality,
    diagnostics: FitDiagnostics,
}

impl Fit {
    /// Fit `basis` to `data` without retaining the data.
    ///
    /// Underdetermined tables (`M < N`) are accepted and produce the
    /// minimum-norm solution.
    ///
    /// # Errors
    /// - [`FitError::EmptyData`] if `data` is empty
    /// - [`FitError::Dimension`] if the basis returns evaluations of the wrong length
    /// - [`FitError::InvalidConfig`] if the basis has no functions
    /// - [`FitError::UnimplementedMethod`] for [`FitMethod::Simple`]
    /// - [`FitError::NonFiniteData`] if an observation or basis value is NaN/∞
    pub fn new(basis: BasisPtr, data: &[(f64, f64)], method: FitMethod) -> Result<Self> {
        Self::with_options(basis, data, FitOptions { method, keep_data: false })
    }

    pub fn with_options(basis: BasisPtr, data: &[(f64, f64)], opts: FitOptions) -> Result<Self> {
        let m = data.len();
        let n = basis.size();
        if n == 0 {
            return Err(FitError::config(format!("basis {} has no functions", basis.name())));
        }
        if m == 0 {
            return Err(FitError::EmptyData);
        }
        if opts.method == FitMethod::Simple {
            return Err(FitError::UnimplementedMethod(FitMethod::Simple));
        }
        if let Some(index) = data.iter().position(|(x, y)| !(x.is_finite() && y.is_finite())) {
            return Err(FitError::NonFiniteData { index });
        }

        debug!("fitting {} (N={n}) to {m} observations", basis.name());
        if m < n {
            warn!(
                "{}: {m} observations for {n} coefficients; returning the minimum-norm solution",
                basis.name()
            );
        }

        let design = design_matrix(basis.as_ref(), data.iter().map(|&(x, _)| x))?;
        let y = DVector::from_iterator(m, data.iter().map(|&(_, y)| y));
        let ls = solve_least_squares(&design, &y)?;

        if ls.rank < n.min(m) {
            warn!(
                "{}: design matrix is rank deficient (rank {} of {}, condition number {:.3e})",
                basis.name(),
                ls.rank,
                n.min(m),
                ls.condition_number()
            );
        }

        let residuals = &y - &design * &ls.coefs;
        let sse = residuals.norm_squared();
        let quality = FitQuality {
            sse,
            rmse: (sse / m as f64).sqrt(),
            n: m,
        };
        let diagnostics = diagnostics_from(&ls);

        Ok(Self {
            basis,
            coefs: ls.coefs,
            method: opts.method,
            data: opts.keep_data.then(|| data.to_vec()),
            quality,
            diagnostics,
        })
    }

    /// The basis this fit was solved against.
    pub fn basis(&self) -> &BasisPtr {
        &self.basis
    }

    /// One coefficient per basis function, in basis order.
    pub fn coefs(&self) -> &DVector<f64> {
        &self.coefs
    }

    pub fn method(&self) -> FitMethod {
        self.method
    }

    /// The data table, if it was retained.
    pub fn data(&self) -> Option<&[(f64, f64)]> {
        self.data.as_deref()
    }

    pub fn quality(&self) -> &FitQuality {
        &self.quality
    }

    pub fn diagnostics(&self) -> &FitDiagnostics {
        &self.diagnostics
    }

    /// Evaluate the fitted function: `coefs · basis(x)`.
    pub fn predict(&self, x: f64) -> f64 {
        self.coefs.dot(&self.basis.evaluate(x))
    }

    pub fn predict_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.predict(x)).collect()
    }

    /// Observed minus fitted values over the retained data.
    pub fn residuals(&self) -> Option<Vec<f64>> {
        self.data
            .as_ref()
            .map(|d| d.iter().map(|&(x, y)| y - self.predict(x)).collect())
    }
}

/// Build the design matrix whose row `i` is `basis(x_i)`.
///
/// # Errors
/// - [`FitError::Dimension`] if an evaluation does not have `basis.size()` entries
/// - [`FitError::NonFiniteData`] if the basis overflows at some abscissa
pub fn design_matrix(basis: &dyn Basis, xs: impl ExactSizeIterator<Item = f64>) -> Result<DMatrix<f64>> {
    let mut out = DMatrix::<f64>::zeros(xs.len(), basis.size());
    for (i, x) in xs.enumerate() {
        let row = basis.evaluate(x);
        if row.len() != out.ncols() {
            return Err(FitError::Dimension {
                rows: i,
                cols: row.len(),
            });
        }
        if row.iter().any(|v| !v.is_finite()) {
            return Err(FitError::NonFiniteData { index: i });
        }
        out.set_row(i, &row.transpose());
    }
    Ok(out)
}

fn diagnostics_from(ls: &LeastSquares) -> FitDiagnostics {
    let condition_number = ls.condition_number();
    FitDiagnostics {
        singular_values: ls.singular_values.iter().copied().collect(),
        tolerance: ls.tolerance,
        rank: ls.rank,
        condition_number: condition_number.is_finite().then_some(condition_number),
    }
}
