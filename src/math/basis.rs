//! Basis-function sets for linear regression.
//!
//! A basis maps a scalar `x` to an ordered vector `[f0(x), ..., f_{N-1}(x)]`.
//! The regression fitter only ever talks to the [`Basis`] trait, so any of the
//! implementations below (or a user type) can be fitted:
//!
//! - [`PolynomialBasis`]: `1, x, x², …, x^d` (N = d + 1)
//! - [`FourierBasis`]: `1, cos(ωx), sin(ωx), …, cos(dωx), sin(dωx)` (N = 2d + 1)
//! - [`CompositeBasis`]: an ordered list of arbitrary unary functions
//!
//! Every basis is immutable after construction: `size()` never changes and
//! `evaluate` has no side effects, so one instance can be shared (`Arc`) across
//! any number of fits, including fits running on other threads.

use std::f64::consts::TAU;
use std::fmt;
use std::sync::Arc;

use nalgebra::DVector;

use crate::error::{FitError, Result};

/// A fixed-size set of basis functions of one variable.
pub trait Basis: fmt::Debug + Send + Sync {
    /// Number of elements returned by [`Basis::evaluate`].
    fn size(&self) -> usize;

    /// Value of each basis function at `x`, in coefficient order.
    fn evaluate(&self, x: f64) -> DVector<f64>;

    /// Short label for reports and plot titles.
    fn name(&self) -> String;
}

/// Validate a degree that arrived through a signed channel (config, CLI).
pub fn checked_degree(degree: i64) -> Result<usize> {
    usize::try_from(degree)
        .map_err(|_| FitError::config(format!("degree must be a non-negative integer, got {degree}")))
}

/// Polynomial basis of finite degree.
///
/// Element `i` of an evaluation is `x^i`; element 0 is the constant term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolynomialBasis {
    degree: usize,
}

impl PolynomialBasis {
    /// Degree 0 is the constant basis (N = 1).
    pub fn new(degree: usize) -> Self {
        Self { degree }
    }

    pub fn try_from_degree(degree: i64) -> Result<Self> {
        Ok(Self::new(checked_degree(degree)?))
    }

    pub fn degree(&self) -> usize {
        self.degree
    }
}

impl Basis for PolynomialBasis {
    fn size(&self) -> usize {
        self.degree + 1
    }

    fn evaluate(&self, x: f64) -> DVector<f64> {
        let n = self.size();
        let mut out = DVector::<f64>::zeros(n);
        out[0] = 1.0;
        // x^i = x^(i-1) * x
        for i in 1..n {
            out[i] = out[i - 1] * x;
        }
        out
    }

    fn name(&self) -> String {
        format!("Polynomial(degree={})", self.degree)
    }
}

/// Fourier basis of finite degree.
///
/// Evaluation layout:
/// - element 0: `1`
/// - element `2j-1`: `cos(j·ω·x)`
/// - element `2j`: `sin(j·ω·x)`
///
/// for `j = 1..=degree`, with `ω = 2π / period`. Without an explicit period,
/// `ω = 1` (period `2π`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourierBasis {
    degree: usize,
    angfreq: f64,
}

impl FourierBasis {
    /// Fourier basis with the default period `2π`.
    pub fn new(degree: usize) -> Self {
        Self { degree, angfreq: 1.0 }
    }

    /// Fourier basis whose fundamental has the given period.
    ///
    /// # Errors
    /// [`FitError::InvalidConfig`] if `period` is not finite and strictly positive.
    pub fn with_period(degree: usize, period: f64) -> Result<Self> {
        if !(period.is_finite() && period > 0.0) {
            return Err(FitError::config(format!(
                "Fourier period must be a positive finite number, got {period}"
            )));
        }
        Ok(Self {
            degree,
            angfreq: TAU / period,
        })
    }

    pub fn try_from_degree(degree: i64, period: Option<f64>) -> Result<Self> {
        let degree = checked_degree(degree)?;
        match period {
            Some(p) => Self::with_period(degree, p),
            None => Ok(Self::new(degree)),
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Angular frequency ω of the fundamental.
    pub fn angular_frequency(&self) -> f64 {
        self.angfreq
    }

    pub fn period(&self) -> f64 {
        TAU / self.angfreq
    }
}

impl Basis for FourierBasis {
    fn size(&self) -> usize {
        2 * self.degree + 1
    }

    fn evaluate(&self, x: f64) -> DVector<f64> {
        let mut out = DVector::<f64>::zeros(self.size());
        out[0] = 1.0;
        for j in 1..=self.degree {
            let theta = j as f64 * self.angfreq * x;
            out[2 * j - 1] = theta.cos();
            out[2 * j] = theta.sin();
        }
        out
    }

    fn name(&self) -> String {
        if self.angfreq == 1.0 {
            format!("Fourier(degree={})", self.degree)
        } else {
            format!("Fourier(degree={}, period={:.4})", self.degree, self.period())
        }
    }
}

/// Unary scalar function usable as a member of a [`CompositeBasis`].
///
/// Implemented for plain function pointers and for shared functors
/// (`Arc<F>` where `F: Fn(f64) -> f64`). A single composite instance holds
/// members of exactly one of these kinds.
pub trait ScalarFn: Send + Sync + 'static {
    fn call(&self, x: f64) -> f64;
}

impl ScalarFn for fn(f64) -> f64 {
    fn call(&self, x: f64) -> f64 {
        self(x)
    }
}

impl<F> ScalarFn for Arc<F>
where
    F: Fn(f64) -> f64 + Send + Sync + ?Sized + 'static,
{
    fn call(&self, x: f64) -> f64 {
        (**self)(x)
    }
}

/// Shared functor handle.
pub type SharedFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// Composite basis of plain function pointers.
pub type FnBasis = CompositeBasis<fn(f64) -> f64>;

/// Composite basis of shared functors.
pub type SharedFnBasis = CompositeBasis<SharedFn>;

/// Basis built from an ordered list of independently supplied functions.
///
/// Element `i` of an evaluation is `fᵢ(x)`, where `fᵢ` is the `i`-th function
/// passed to the builder. The order is never changed: coefficient `i` of a fit
/// always belongs to function `i`.
pub struct CompositeBasis<F: ScalarFn> {
    funcs: Vec<F>,
    label: Option<String>,
}

impl<F: ScalarFn> CompositeBasis<F> {
    pub fn builder() -> CompositeBuilder<F> {
        CompositeBuilder {
            funcs: Vec::new(),
            label: None,
        }
    }

    /// Build directly from an ordered collection of functions.
    ///
    /// # Errors
    /// [`FitError::InvalidConfig`] if the collection is empty.
    pub fn from_functions(funcs: impl IntoIterator<Item = F>) -> Result<Self> {
        funcs
            .into_iter()
            .fold(Self::builder(), CompositeBuilder::with)
            .build()
    }
}

impl<F: ScalarFn> Basis for CompositeBasis<F> {
    fn size(&self) -> usize {
        self.funcs.len()
    }

    fn evaluate(&self, x: f64) -> DVector<f64> {
        DVector::from_iterator(self.funcs.len(), self.funcs.iter().map(|f| f.call(x)))
    }

    fn name(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("Composite(n={})", self.funcs.len()),
        }
    }
}

impl<F: ScalarFn> fmt::Debug for CompositeBasis<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeBasis")
            .field("size", &self.funcs.len())
            .field("label", &self.label)
            .finish()
    }
}

/// Append-only builder for [`CompositeBasis`].
pub struct CompositeBuilder<F: ScalarFn> {
    funcs: Vec<F>,
    label: Option<String>,
}

impl<F: ScalarFn> CompositeBuilder<F> {
    /// Append the next basis function.
    pub fn with(mut self, f: F) -> Self {
        self.funcs.push(f);
        self
    }

    /// Override the label returned by [`Basis::name`].
    pub fn named(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn build(self) -> Result<CompositeBasis<F>> {
        if self.funcs.is_empty() {
            return Err(FitError::config("composite basis needs at least one function"));
        }
        Ok(CompositeBasis {
            funcs: self.funcs,
            label: self.label,
        })
    }
}

impl CompositeBuilder<SharedFn> {
    /// Append a closure, wrapping it in a shared handle.
    pub fn with_fn(self, f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        self.with(Arc::new(f))
    }
}
