//! Fit several bases against the same observations.
//!
//! Each basis is fitted independently (in parallel). Bases and data are only
//! ever read, so the same `Arc` handle may appear in several fits at once.

use rayon::prelude::*;

use crate::domain::FitMethod;
use crate::error::Result;
use crate::fit::fitter::{BasisPtr, Fit};

/// Fit every basis in `bases` to `data`.
///
/// Results are returned in the same order as `bases`. If any fit fails, one
/// of the failures is returned.
pub fn fit_all(bases: &[BasisPtr], data: &[(f64, f64)], method: FitMethod) -> Result<Vec<Fit>> {
    bases
        .par_iter()
        .map(|basis| Fit::new(BasisPtr::clone(basis), data, method))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::FitError;
    use crate::math::{FourierBasis, PolynomialBasis};

    #[test]
    fn fits_come_back_in_input_order() {
        let data: Vec<(f64, f64)> = (0..50)
            .map(|i| {
                let x = i as f64 * 0.1;
                (x, 1.0 + x.sin())
            })
            .collect();
        let fourier: BasisPtr = Arc::new(FourierBasis::new(1));
        let bases = vec![
            Arc::clone(&fourier),
            Arc::new(PolynomialBasis::new(3)) as BasisPtr,
            Arc::clone(&fourier),
        ];

        let fits = fit_all(&bases, &data, FitMethod::Svd).unwrap();
        assert_eq!(fits.len(), 3);
        assert_eq!(fits[0].basis().size(), 3);
        assert_eq!(fits[1].basis().size(), 4);
        assert_eq!(fits[0].coefs(), fits[2].coefs());
        assert!((fits[0].coefs()[2] - 1.0).abs() < 1e-8);
    }

    #[test]
    fn failure_is_propagated() {
        let bases: Vec<BasisPtr> = vec![Arc::new(PolynomialBasis::new(1))];
        let err = fit_all(&bases, &[], FitMethod::Svd).unwrap_err();
        assert_eq!(err, FitError::EmptyData);
    }
}
