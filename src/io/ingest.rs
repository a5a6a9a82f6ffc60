//! CSV ingest of `(x, y)` observation tables.
//!
//! Design goals:
//! - **Strict schema** for required fields: an `x` and a `y` column (clear errors + exit code 2)
//! - **Row-level validation** (skip bad rows, but report what happened)
//! - **Order preserving**: rows are returned in file order
//! - **Separation of concerns**: no fitting logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use log::warn;

use crate::error::AppError;

/// Summary stats about the points actually used for fitting.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// A row-level error encountered during ingest.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Ingest output: observations + stats + row errors.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub points: Vec<(f64, f64)>,
    pub stats: DatasetStats,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load an `(x, y)` table from a CSV file.
pub fn load_points(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_points(file)
}

/// Parse an `(x, y)` table from any CSV reader.
///
/// Lines starting with `#` are ignored.
pub fn read_points<R: Read>(input: R) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(input);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers: {e}")))?
        .clone();
    let header_map = build_header_map(&headers);
    let x_idx = required_column(&header_map, "x")?;
    let y_idx = required_column(&header_map, "y")?;

    let mut points = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for result in reader.records() {
        rows_read += 1;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map(|p| p.line() as usize).unwrap_or(0);
                row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };
        let line = record.position().map(|p| p.line() as usize).unwrap_or(0);

        match parse_pair(&record, x_idx, y_idx) {
            Ok(pair) => points.push(pair),
            Err(message) => row_errors.push(RowError { line, message }),
        }
    }

    for e in &row_errors {
        warn!("skipping line {}: {}", e.line, e.message);
    }

    let stats = compute_stats(&points)
        .ok_or_else(|| AppError::new(3, "No valid rows remain after validation."))?;

    Ok(IngestedData {
        points,
        stats,
        row_errors,
        rows_read,
    })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports sometimes prefix the first header with a BOM.
    name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase()
}

fn required_column(header_map: &HashMap<String, usize>, name: &str) -> Result<usize, AppError> {
    header_map
        .get(name)
        .copied()
        .ok_or_else(|| AppError::new(2, format!("Missing required CSV column '{name}'.")))
}

fn parse_pair(record: &StringRecord, x_idx: usize, y_idx: usize) -> Result<(f64, f64), String> {
    let x = parse_f64(record, x_idx, "x")?;
    let y = parse_f64(record, y_idx, "y")?;
    Ok((x, y))
}

fn parse_f64(record: &StringRecord, idx: usize, name: &str) -> Result<f64, String> {
    let raw = record
        .get(idx)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("missing value for '{name}'"))?;
    let v: f64 = raw
        .parse()
        .map_err(|_| format!("invalid number for '{name}': '{raw}'"))?;
    if !v.is_finite() {
        return Err(format!("non-finite value for '{name}': '{raw}'"));
    }
    Ok(v)
}

pub fn compute_stats(points: &[(f64, f64)]) -> Option<DatasetStats> {
    if points.is_empty() {
        return None;
    }

    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    if !x_min.is_finite() || !x_max.is_finite() || !y_min.is_finite() || !y_max.is_finite() {
        return None;
    }

    Some(DatasetStats {
        n_points: points.len(),
        x_min,
        x_max,
        y_min,
        y_max,
    })
}
