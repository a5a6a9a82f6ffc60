//! Synthetic data generation: Gaussian noise around a model function.
//!
//! Abscissas are evenly spaced on `[x_min, x_max]`; each ordinate is
//! `f(x) + N(0, σ²)`. A fixed seed always reproduces the same table.

use nalgebra::DVector;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use crate::error::{FitError, Result};
use crate::math::Basis;

/// Parameters of a synthetic data table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleSpec {
    /// Number of points (at least 2).
    pub points: usize,
    pub x_min: f64,
    pub x_max: f64,
    /// Standard deviation of the noise along the ordinate.
    pub sigma: f64,
    pub seed: u64,
}

/// `n` evenly spaced values from `x_min` to `x_max` inclusive.
pub fn linspace(x_min: f64, x_max: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![x_min],
        _ => {
            let dx = (x_max - x_min) / (n as f64 - 1.0);
            (0..n)
                .map(|i| if i == n - 1 { x_max } else { x_min + i as f64 * dx })
                .collect()
        }
    }
}

/// Generate `(x, f(x) + noise)` pairs.
///
/// # Errors
/// [`FitError::InvalidConfig`] for fewer than two points, a non-finite range,
/// or a negative/non-finite `sigma`.
pub fn generate_sample(spec: &SampleSpec, f: impl Fn(f64) -> f64) -> Result<Vec<(f64, f64)>> {
    if spec.points < 2 {
        return Err(FitError::config("synthetic data needs at least 2 points"));
    }
    if !(spec.x_min.is_finite() && spec.x_max.is_finite()) {
        return Err(FitError::config("invalid abscissa range for synthetic data"));
    }
    if !(spec.sigma.is_finite() && spec.sigma >= 0.0) {
        return Err(FitError::config(format!(
            "noise sigma must be a non-negative finite number, got {}",
            spec.sigma
        )));
    }
    let normal = Normal::new(0.0, spec.sigma)
        .map_err(|e| FitError::config(format!("noise distribution error: {e}")))?;

    let mut rng = StdRng::seed_from_u64(spec.seed);
    let points = linspace(spec.x_min, spec.x_max, spec.points)
        .into_iter()
        .map(|x| (x, normal.sample(&mut rng) + f(x)))
        .collect();
    Ok(points)
}

/// The linear combination `coefs · basis(x)` as a plain function.
///
/// # Errors
/// [`FitError::Dimension`] if `coefs` does not have one entry per basis function.
pub fn basis_model<'a>(
    basis: &'a dyn Basis,
    coefs: &'a DVector<f64>,
) -> Result<impl Fn(f64) -> f64 + 'a> {
    if coefs.len() != basis.size() {
        return Err(FitError::Dimension {
            rows: coefs.len(),
            cols: basis.size(),
        });
    }
    Ok(move |x: f64| coefs.dot(&basis.evaluate(x)))
}

/// Coefficients `1, 2, …, n`.
pub fn ascending_coefs(n: usize) -> DVector<f64> {
    DVector::from_iterator(n, (1..=n).map(|i| i as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::FourierBasis;

    fn spec(sigma: f64, seed: u64) -> SampleSpec {
        SampleSpec {
            points: 11,
            x_min: 0.0,
            x_max: 1.0,
            sigma,
            seed,
        }
    }

    #[test]
    fn linspace_includes_both_ends() {
        let xs = linspace(-1.0, 1.0, 5);
        assert_eq!(xs, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(linspace(3.0, 4.0, 1), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn zero_noise_reproduces_model() {
        let data = generate_sample(&spec(0.0, 7), |x| 3.0 * x - 1.0).unwrap();
        assert_eq!(data.len(), 11);
        for &(x, y) in &data {
            assert_eq!(y, 3.0 * x - 1.0);
        }
    }

    #[test]
    fn same_seed_same_noise() {
        let a = generate_sample(&spec(0.5, 42), |x| x).unwrap();
        let b = generate_sample(&spec(0.5, 42), |x| x).unwrap();
        let c = generate_sample(&spec(0.5, 43), |x| x).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn invalid_specs_are_rejected() {
        let mut s = spec(1.0, 1);
        s.points = 1;
        assert!(matches!(generate_sample(&s, |x| x), Err(FitError::InvalidConfig(_))));
        for sigma in [-1.0, -1e-12, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                generate_sample(&spec(sigma, 1), |x| x),
                Err(FitError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn basis_model_matches_dot_product() {
        let basis = FourierBasis::new(1);
        let coefs = ascending_coefs(3);
        let f = basis_model(&basis, &coefs).unwrap();
        let x = 0.4_f64;
        assert!((f(x) - (1.0 + 2.0 * x.cos() + 3.0 * x.sin())).abs() < 1e-12);

        let short = ascending_coefs(2);
        assert!(basis_model(&basis, &short).is_err());
    }
}
