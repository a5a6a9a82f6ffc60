//! Shared "fit pipeline" logic behind the CLI commands.
//!
//! Each `run_*` function does the computation for one command and returns its
//! outputs; printing and file writing stay in `app`.

use std::f64::consts::TAU;
use std::path::PathBuf;

use log::info;

use crate::data::{SampleSpec, Sinusoid, ascending_coefs, basis_model, generate_sample};
use crate::domain::{BasisSpec, FitConfig, GenerateConfig, SinusoidConfig};
use crate::error::AppError;
use crate::fit::{Fit, FitOptions, fit_all};
use crate::io::ingest::{DatasetStats, IngestedData, compute_stats, load_points};
use crate::plot::{GnuPlot, PlotStyle};

/// Number of samples per fitted curve in gnuplot output.
const GNUPLOT_CURVE_POINTS: usize = 200;

/// Outputs of `linreg sinusoid`.
#[derive(Debug, Clone)]
pub struct SinusoidRun {
    pub points: Vec<(f64, f64)>,
    pub stats: DatasetStats,
    pub fourier: Fit,
    pub polynomial: Fit,
}

/// Outputs of `linreg fit`.
#[derive(Debug, Clone)]
pub struct FitRun {
    pub ingest: IngestedData,
    pub fit: Fit,
}

/// Generate noisy Fourier data on `[0, 2π]` and fit it with a Fourier and a
/// polynomial basis.
///
/// The data come from the Fourier basis itself with coefficients `1, 2, …, N`.
pub fn run_sinusoid(config: &SinusoidConfig) -> Result<SinusoidRun, AppError> {
    let fourier = BasisSpec::fourier(config.fourier_degree, None).build()?;
    let polynomial = BasisSpec::polynomial(config.poly_degree).build()?;

    let coefs = ascending_coefs(fourier.size());
    let model = basis_model(fourier.as_ref(), &coefs)?;
    let spec = SampleSpec {
        points: config.points,
        x_min: 0.0,
        x_max: TAU,
        sigma: config.sigma,
        seed: config.seed,
    };
    let points = generate_sample(&spec, model)?;
    let stats = compute_stats(&points).ok_or_else(|| AppError::new(3, "No synthetic points generated"))?;

    let mut fits = fit_all(&[fourier, polynomial], &points, config.method)?.into_iter();
    let (Some(fourier), Some(polynomial)) = (fits.next(), fits.next()) else {
        return Err(AppError::new(4, "Expected one fit per basis"));
    };

    Ok(SinusoidRun {
        points,
        stats,
        fourier,
        polynomial,
    })
}

/// Load a CSV table and fit the configured basis to it.
pub fn run_fit(config: &FitConfig) -> Result<FitRun, AppError> {
    let ingest = load_points(&config.input)?;
    if !ingest.row_errors.is_empty() {
        info!(
            "{}: skipped {} of {} rows",
            config.input.display(),
            ingest.row_errors.len(),
            ingest.rows_read
        );
    }

    let basis = config.basis.build()?;
    let fit = Fit::with_options(
        basis,
        &ingest.points,
        FitOptions {
            method: config.method,
            keep_data: true,
        },
    )?;

    Ok(FitRun { ingest, fit })
}

/// Sample a noisy sinusoid.
pub fn run_generate(config: &GenerateConfig) -> Result<Vec<(f64, f64)>, AppError> {
    let sinusoid = Sinusoid::new(config.amplitude, config.period, config.phase)?;
    let spec = SampleSpec {
        points: config.points,
        x_min: config.x_min,
        x_max: config.x_max,
        sigma: config.sigma,
        seed: config.seed,
    };
    Ok(generate_sample(&spec, |t| sinusoid.eval(t))?)
}

/// Write the data points plus one sampled curve per fit as gnuplot input.
///
/// Returns the path of the `.gpi` script.
pub fn write_gnuplot(
    basename: &str,
    points: &[(f64, f64)],
    stats: &DatasetStats,
    fits: &[&Fit],
) -> Result<PathBuf, AppError> {
    let mut plot = GnuPlot::new(basename);
    plot.xlabel("x").ylabel("y").xrange(stats.x_min, stats.x_max);
    plot.add_data_plot(points, PlotStyle::Points, "data");
    for fit in fits {
        plot.add_func_plot(
            stats.x_min,
            stats.x_max,
            GNUPLOT_CURVE_POINTS,
            |x| fit.predict(x),
            PlotStyle::Lines,
            &fit.basis().name(),
        )?;
    }
    plot.write()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FitMethod;

    fn sinusoid_config(method: FitMethod) -> SinusoidConfig {
        SinusoidConfig {
            points: 100,
            seed: 7,
            sigma: 0.0,
            fourier_degree: 1,
            poly_degree: 3,
            method,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export: None,
            gnuplot: None,
        }
    }

    #[test]
    fn noise_free_sinusoid_recovers_generating_coefficients() {
        let run = run_sinusoid(&sinusoid_config(FitMethod::Svd)).unwrap();
        assert_eq!(run.points.len(), 100);
        assert_eq!(run.fourier.coefs().len(), 3);
        assert_eq!(run.polynomial.coefs().len(), 4);
        for (c, expected) in run.fourier.coefs().iter().zip([1.0, 2.0, 3.0]) {
            assert!((c - expected).abs() < 1e-8, "{c} vs {expected}");
        }
        assert!(run.fourier.quality().sse < run.polynomial.quality().sse);
    }

    #[test]
    fn sinusoid_rejects_simple_method() {
        let err = run_sinusoid(&sinusoid_config(FitMethod::Simple)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn sinusoid_rejects_negative_degree() {
        let mut config = sinusoid_config(FitMethod::Svd);
        config.poly_degree = -1;
        assert_eq!(run_sinusoid(&config).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn generate_is_reproducible() {
        let config = GenerateConfig {
            amplitude: 2.0,
            period: 1.0,
            phase: 0.0,
            points: 20,
            x_min: 0.0,
            x_max: 1.0,
            sigma: 0.1,
            seed: 42,
            output: PathBuf::from("unused.csv"),
        };
        let a = run_generate(&config).unwrap();
        let b = run_generate(&config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
    }

    #[test]
    fn negative_sigma_is_a_config_error() {
        let mut config = sinusoid_config(FitMethod::Svd);
        config.sigma = -1.0;
        assert_eq!(run_sinusoid(&config).unwrap_err().exit_code(), 2);

        let generate = GenerateConfig {
            amplitude: 1.0,
            period: 1.0,
            phase: 0.0,
            points: 5,
            x_min: 0.0,
            x_max: 1.0,
            sigma: -1.0,
            seed: 1,
            output: PathBuf::from("unused.csv"),
        };
        assert_eq!(run_generate(&generate).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn fit_pipeline_reads_csv_and_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("line.csv");
        std::fs::write(&input, "x,y\n0,1\n1,3\n2,5\nbad,row\n3,7\n").unwrap();

        let config = FitConfig {
            input,
            basis: BasisSpec::polynomial(1),
            method: FitMethod::Svd,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_fit: None,
            gnuplot: None,
        };
        let run = run_fit(&config).unwrap();

        assert_eq!(run.ingest.points.len(), 4);
        assert_eq!(run.ingest.row_errors.len(), 1);
        assert_eq!(run.fit.data().map(<[_]>::len), Some(4));
        assert!((run.fit.coefs()[0] - 1.0).abs() < 1e-9);
        assert!((run.fit.coefs()[1] - 2.0).abs() < 1e-9);
    }

    #[test]
    fn gnuplot_output_has_data_and_one_curve_per_fit() {
        let run = run_sinusoid(&sinusoid_config(FitMethod::Svd)).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("demo").to_string_lossy().into_owned();

        let script = write_gnuplot(&base, &run.points, &run.stats, &[&run.fourier, &run.polynomial]).unwrap();
        let gpi = std::fs::read_to_string(script).unwrap();
        assert!(gpi.contains("with points title \"data\""));
        assert!(gpi.contains("with lines title \"Fourier(degree=1)\""));
        assert!(gpi.contains("with lines title \"Polynomial(degree=3)\""));
        assert!(std::path::Path::new(&format!("{base}2.dat")).exists());
    }
}
