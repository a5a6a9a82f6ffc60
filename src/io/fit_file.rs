//! Read/write fit JSON files.
//!
//! Fit JSON is the "portable" representation of a fit:
//! - basis label, size and solve method
//! - coefficients, quality and SVD diagnostics
//! - a precomputed fitted grid for quick plotting
//!
//! The schema is defined by `domain::FitFile`.

use std::fs::File;
use std::path::Path;

use chrono::Utc;

use crate::data::linspace;
use crate::domain::{FitFile, FitGrid};
use crate::error::AppError;
use crate::fit::Fit;

/// Number of grid points stored in a fit file.
pub const GRID_POINTS: usize = 101;

/// Build the serializable form of a fit, sampling it on `[x_min, x_max]`.
pub fn fit_file(fit: &Fit, x_min: f64, x_max: f64) -> FitFile {
    let (x0, x1) = grid_range(x_min, x_max);
    let x = linspace(x0, x1, GRID_POINTS);
    let y = fit.predict_many(&x);

    FitFile {
        tool: "linreg".to_string(),
        generated_at: Utc::now(),
        basis: fit.basis().name(),
        size: fit.basis().size(),
        method: fit.method(),
        coefficients: fit.coefs().iter().copied().collect(),
        quality: fit.quality().clone(),
        diagnostics: fit.diagnostics().clone(),
        grid: FitGrid { x, y },
    }
}

/// Write a fit JSON file.
pub fn write_fit_json(path: &Path, fit: &Fit, x_min: f64, x_max: f64) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create fit JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &fit_file(fit, x_min, x_max))
        .map_err(|e| AppError::new(2, format!("Failed to write fit JSON: {e}")))?;

    Ok(())
}

/// Read a fit JSON file.
pub fn read_fit_json(path: &Path) -> Result<FitFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open fit JSON '{}': {e}", path.display())))?;
    let fit: FitFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid fit JSON: {e}")))?;
    Ok(fit)
}

fn grid_range(x_min: f64, x_max: f64) -> (f64, f64) {
    if !(x_min.is_finite() && x_max.is_finite()) || x_max < x_min {
        return (0.0, 1.0);
    }
    if (x_max - x_min).abs() < 1e-9 {
        return (x_min - 0.5, x_max + 0.5);
    }
    (x_min, x_max)
}
