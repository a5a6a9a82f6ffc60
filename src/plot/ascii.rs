//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks of a fit in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - observed points: `o`
//! - fitted curves: `-`, `~`, `=`, `+`, `*` (cycled, one per fit)

use crate::domain::FitFile;
use crate::fit::Fit;

const CURVE_CHARS: [char; 5] = ['-', '~', '=', '+', '*'];

/// Render observations together with one curve per fit.
pub fn render_ascii_plot(points: &[(f64, f64)], fits: &[&Fit], width: usize, height: usize) -> String {
    let (x_min, x_max) = x_range(points).unwrap_or((0.0, 1.0));
    let curves: Vec<(char, Vec<(f64, f64)>)> = fits
        .iter()
        .enumerate()
        .map(|(i, fit)| (curve_char(i), sample_fit(fit, x_min, x_max, width.max(2))))
        .collect();

    let mut out = render_plot(points, &curves, x_min, x_max, width, height);
    out.push_str(&legend(
        !points.is_empty(),
        fits.iter().map(|f| f.basis().name()).collect(),
    ));
    out
}

/// Render the stored grid of a saved fit file (curve only).
pub fn render_ascii_plot_from_fit_file(file: &FitFile, width: usize, height: usize) -> String {
    let curve: Vec<(f64, f64)> = file
        .grid
        .x
        .iter()
        .zip(file.grid.y.iter())
        .map(|(&x, &y)| (x, y))
        .collect();
    let (x_min, x_max) = x_range(&curve).unwrap_or((0.0, 1.0));

    let mut out = render_plot(&[], &[(curve_char(0), curve)], x_min, x_max, width, height);
    out.push_str(&legend(false, vec![file.basis.clone()]));
    out
}

fn curve_char(i: usize) -> char {
    CURVE_CHARS[i % CURVE_CHARS.len()]
}

fn legend(has_points: bool, names: Vec<String>) -> String {
    let mut parts = Vec::new();
    if has_points {
        parts.push("o data".to_string());
    }
    for (i, name) in names.into_iter().enumerate() {
        parts.push(format!("{} {name}", curve_char(i)));
    }
    format!("Legend: {}\n", parts.join(" | "))
}

fn render_plot(
    points: &[(f64, f64)],
    curves: &[(char, Vec<(f64, f64)>)],
    x_min: f64,
    x_max: f64,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    // Determine y-range from observed points and curve points.
    let (y_min, y_max) = y_range(points, curves).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let mut grid = vec![vec![' '; width]; height];

    // Draw curves first (so points can overlay).
    for (ch, curve) in curves {
        draw_curve(&mut grid, curve, *ch, x_min, x_max, y_min, y_max);
    }

    for &(x, y) in points {
        if !(x.is_finite() && y.is_finite()) {
            continue;
        }
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn x_range(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    for &(x, _) in points {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
    }
    if min_x.is_finite() && max_x.is_finite() && max_x > min_x {
        Some((min_x, max_x))
    } else {
        None
    }
}

fn sample_fit(fit: &Fit, x_min: f64, x_max: f64, n: usize) -> Vec<(f64, f64)> {
    let n = n.max(2);
    (0..n)
        .map(|i| {
            let u = i as f64 / (n as f64 - 1.0);
            let x = x_min + u * (x_max - x_min);
            (x, fit.predict(x))
        })
        .collect()
}

fn y_range(points: &[(f64, f64)], curves: &[(char, Vec<(f64, f64)>)]) -> Option<(f64, f64)> {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;

    let all = points
        .iter()
        .chain(curves.iter().flat_map(|(_, c)| c.iter()));
    for &(_, y) in all {
        if y.is_finite() {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
    }

    if min_y.is_finite() && max_y.is_finite() && max_y > min_y {
        Some((min_y, max_y))
    } else {
        None
    }
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    ch: char,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(x, y) in curve {
        if !y.is_finite() {
            prev = None;
            continue;
        }
        let col = map_x(x, x_min, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        if let Some((c0, r0)) = prev {
            draw_line(grid, c0, r0, col, row, ch);
        } else if grid[row][col] == ' ' {
            grid[row][col] = ch;
        }
        prev = Some((col, row));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::FitMethod;
    use crate::math::PolynomialBasis;

    #[test]
    fn plot_golden_snapshot_small() {
        let fit = Fit::new(
            Arc::new(PolynomialBasis::new(0)),
            &[(1.0, 100.0), (10.0, 100.0)],
            FitMethod::Svd,
        )
        .unwrap();
        let points = [(1.0, 100.0), (10.0, 110.0)];

        let txt = render_ascii_plot(&points, &[&fit], 10, 5);
        let expected = concat!(
            "Plot: x=[1.000, 10.000] | y=[99.50, 110.50]\n",
            "         o\n",
            "          \n",
            "          \n",
            "          \n",
            "o---------\n",
            "Legend: o data | - Polynomial(degree=0)\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn curves_cycle_through_characters() {
        assert_eq!(curve_char(0), '-');
        assert_eq!(curve_char(1), '~');
        assert_eq!(curve_char(5), '-');
    }
}
