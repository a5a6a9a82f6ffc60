//! SVD least squares solver.
//!
//! We solve `minimize ‖B c - y‖₂` through a thin singular value decomposition of
//! the design matrix `B`:
//!
//! ```text
//! c = V Σ⁺ Uᵀ y
//! ```
//!
//! Implementation choices:
//! - SVD rather than the normal equations, because `BᵀB` squares the condition
//!   number and high-degree polynomial bases are nearly collinear.
//! - Singular values at or below `σ_max · ε · min(M, N)` are treated as zero.
//!   Rank-deficient and underdetermined systems therefore get the
//!   minimum-norm solution instead of an error.
//! - Nothing is regularized.

use nalgebra::{DMatrix, DVector};

use crate::error::{FitError, Result};

/// Output of [`solve_least_squares`].
#[derive(Debug, Clone)]
pub struct LeastSquares {
    pub coefs: DVector<f64>,
    /// Singular values of the design matrix, in decreasing order.
    pub singular_values: DVector<f64>,
    /// Singular values above this threshold took part in the solution.
    pub tolerance: f64,
    /// Number of singular values above `tolerance`.
    pub rank: usize,
}

impl LeastSquares {
    /// Ratio of the largest to the smallest singular value.
    ///
    /// Infinite when the design matrix is exactly singular.
    pub fn condition_number(&self) -> f64 {
        let max = self.singular_values.max();
        let min = self.singular_values.min();
        if min > 0.0 { max / min } else { f64::INFINITY }
    }
}

/// Relative cut-off below which singular values are discarded.
pub fn default_tolerance(singular_values: &DVector<f64>, rows: usize, cols: usize) -> f64 {
    if singular_values.is_empty() {
        return 0.0;
    }
    singular_values.max() * f64::EPSILON * rows.min(cols) as f64
}

/// Solve a least squares problem using SVD.
///
/// # Errors
/// - [`FitError::Dimension`] if `x` has no rows or columns, or if `y` does not
///   have one entry per row of `x`.
/// - [`FitError::Solver`] if the decomposition cannot be applied.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Result<LeastSquares> {
    let (rows, cols) = x.shape();
    if rows == 0 || cols == 0 || y.len() != rows {
        return Err(FitError::Dimension { rows, cols });
    }

    let svd = x.clone().svd(true, true);
    let tolerance = default_tolerance(&svd.singular_values, rows, cols);
    let coefs = svd.solve(y, tolerance).map_err(FitError::Solver)?;
    if coefs.iter().any(|v| !v.is_finite()) {
        return Err(FitError::Solver("least squares solution is not finite"));
    }

    let rank = svd.singular_values.iter().filter(|&&s| s > tolerance).count();
    Ok(LeastSquares {
        coefs,
        singular_values: svd.singular_values,
        tolerance,
        rank,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let ls = solve_least_squares(&x, &y).unwrap();
        assert!((ls.coefs[0] - 2.0).abs() < 1e-10);
        assert!((ls.coefs[1] - 3.0).abs() < 1e-10);
        assert_eq!(ls.rank, 2);
        assert!(ls.condition_number().is_finite());
    }

    #[test]
    fn overdetermined_noisy_system_minimizes_residual() {
        // Best line through (0,0), (1,1), (2,1): slope 1/2, intercept 1/6.
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[0.0, 1.0, 1.0]);

        let ls = solve_least_squares(&x, &y).unwrap();
        assert!((ls.coefs[0] - 1.0 / 6.0).abs() < 1e-12);
        assert!((ls.coefs[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn rank_deficient_system_gets_minimum_norm_solution() {
        // Two identical columns: any c0 + c1 = 2 fits; minimum norm is (1, 1).
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        let y = DVector::from_row_slice(&[2.0, 2.0, 2.0]);

        let ls = solve_least_squares(&x, &y).unwrap();
        assert_eq!(ls.rank, 1);
        assert!((ls.coefs[0] - 1.0).abs() < 1e-12);
        assert!((ls.coefs[1] - 1.0).abs() < 1e-12);
        assert!(ls.condition_number() > 1e12);
    }

    #[test]
    fn underdetermined_system_gets_minimum_norm_solution() {
        // One equation c0 + c1 = 2 in two unknowns.
        let x = DMatrix::from_row_slice(1, 2, &[1.0, 1.0]);
        let y = DVector::from_row_slice(&[2.0]);

        let ls = solve_least_squares(&x, &y).unwrap();
        assert!((ls.coefs[0] - 1.0).abs() < 1e-12);
        assert!((ls.coefs[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let x = DMatrix::from_row_slice(2, 1, &[1.0, 1.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(
            solve_least_squares(&x, &y).unwrap_err(),
            FitError::Dimension { rows: 2, cols: 1 }
        );
    }
}
