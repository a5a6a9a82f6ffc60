//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::fit::Fit;
use crate::io::ingest::DatasetStats;

/// Dataset line + one diagnostics block per fit.
pub fn format_run_summary(title: &str, stats: &DatasetStats, fits: &[&Fit]) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== linreg - {title} ===\n"));
    out.push_str(&format!(
        "Points: n={} | x=[{:.3}, {:.3}] | y=[{:.3}, {:.3}]\n",
        stats.n_points, stats.x_min, stats.x_max, stats.y_min, stats.y_max
    ));

    for fit in fits {
        out.push('\n');
        out.push_str(&format_fit(fit));
    }

    out
}

/// Basis, coefficients, quality and SVD diagnostics for one fit.
pub fn format_fit(fit: &Fit) -> String {
    let diag = fit.diagnostics();
    let quality = fit.quality();
    let mut out = String::new();

    out.push_str(&format!("{} [method={}]\n", fit.basis().name(), fit.method()));
    out.push_str(&format!(
        "- coefs: {}\n",
        fmt_vec(&fit.coefs().iter().copied().collect::<Vec<_>>())
    ));
    out.push_str(&format!("- SSE={:.6} RMSE={:.6}\n", quality.sse, quality.rmse));
    let cond = diag
        .condition_number
        .map(|c| format!("{c:.3e}"))
        .unwrap_or_else(|| "inf".to_string());
    out.push_str(&format!(
        "- rank={}/{} cond={cond}\n",
        diag.rank,
        fit.basis().size()
    ));

    out
}

/// Whitespace-separated table: `x y fit_1 fit_2 ...`, one line per observation.
pub fn format_prediction_table(points: &[(f64, f64)], fits: &[&Fit]) -> String {
    let mut out = String::new();
    for &(x, y) in points {
        out.push_str(&format!("{x} {y}"));
        for fit in fits {
            out.push_str(&format!(" {}", fit.predict(x)));
        }
        out.push('\n');
    }
    out
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::FitMethod;
    use crate::io::ingest::compute_stats;
    use crate::math::PolynomialBasis;

    fn line_fit(points: &[(f64, f64)]) -> Fit {
        Fit::new(Arc::new(PolynomialBasis::new(1)), points, FitMethod::Svd).unwrap()
    }

    #[test]
    fn summary_lists_every_fit() {
        let points = vec![(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)];
        let fit = line_fit(&points);
        let stats = compute_stats(&points).unwrap();

        let txt = format_run_summary("test", &stats, &[&fit, &fit]);
        assert!(txt.starts_with("=== linreg - test ===\nPoints: n=3 | x=[0.000, 2.000] | y=[1.000, 5.000]\n"));
        assert_eq!(txt.matches("Polynomial(degree=1) [method=svd]").count(), 2);
        assert!(txt.contains("- coefs: [1.000000, 2.000000]\n"));
        assert!(txt.contains("- rank=2/2 cond="));
    }

    #[test]
    fn prediction_table_has_one_column_per_fit() {
        let points = vec![(0.0, 1.0), (1.0, 3.0)];
        let fit = line_fit(&points);
        let txt = format_prediction_table(&points, &[&fit]);
        let rows: Vec<Vec<f64>> = txt
            .lines()
            .map(|l| l.split(' ').map(|v| v.parse().unwrap()).collect())
            .collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
        assert!((rows[1][2] - 3.0).abs() < 1e-10);
    }
}
