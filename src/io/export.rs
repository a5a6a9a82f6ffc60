//! Export observations and fitted values to CSV.
//!
//! One row per observation: `x, y`, then one fitted-value column per fit.
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::io::Write;
use std::path::Path;

use crate::error::AppError;
use crate::fit::Fit;

/// Write `x,y` rows (the format read back by `io::ingest`).
pub fn write_points_csv(path: &Path, points: &[(f64, f64)]) -> Result<(), AppError> {
    write_fit_table_csv(path, points, &[])
}

/// Write observations alongside each fit's prediction at the same abscissa.
///
/// `fits` pairs a column header with its fit.
pub fn write_fit_table_csv(path: &Path, points: &[(f64, f64)], fits: &[(&str, &Fit)]) -> Result<(), AppError> {
    let file = std::fs::File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_fit_table(file, points, fits)
}

/// Same as [`write_fit_table_csv`] for any writer.
pub fn write_fit_table<W: Write>(out: W, points: &[(f64, f64)], fits: &[(&str, &Fit)]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["x", "y"];
    header.extend(fits.iter().map(|(name, _)| *name));
    writer
        .write_record(&header)
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for &(x, y) in points {
        let mut row = vec![format!("{x}"), format!("{y}")];
        row.extend(fits.iter().map(|(_, fit)| format!("{}", fit.predict(x))));
        writer
            .write_record(&row)
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}
