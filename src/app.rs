//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - turns flags into config structs
//! - runs the fit pipeline
//! - prints reports/plots and writes optional exports

use clap::Parser;
use log::{LevelFilter, info};

use crate::cli::{Cli, Command, FitArgs, GenerateArgs, PlotArgs, SinusoidArgs};
use crate::domain::{BasisSpec, FitConfig, GenerateConfig, SinusoidConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `linreg` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Sinusoid(args) => handle_sinusoid(&args),
        Command::Fit(args) => handle_fit(&args),
        Command::Generate(args) => handle_generate(&args),
        Command::Plot(args) => handle_plot(&args),
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default.as_str()))
        .format_timestamp(None)
        .try_init();
}

fn handle_sinusoid(args: &SinusoidArgs) -> Result<(), AppError> {
    let config = sinusoid_config_from_args(args);
    let run = pipeline::run_sinusoid(&config)?;
    let fits = [&run.fourier, &run.polynomial];

    println!(
        "{}",
        crate::report::format_run_summary("sinusoid", &run.stats, &fits)
    );

    match &config.export {
        Some(path) => {
            crate::io::export::write_fit_table_csv(
                path,
                &run.points,
                &[("fourier", &run.fourier), ("polynomial", &run.polynomial)],
            )?;
            info!("wrote {}", path.display());
        }
        None => print!("{}", crate::report::format_prediction_table(&run.points, &fits)),
    }

    if config.plot {
        let plot = crate::plot::render_ascii_plot(&run.points, &fits, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    if let Some(basename) = &config.gnuplot {
        let script = pipeline::write_gnuplot(basename, &run.points, &run.stats, &fits)?;
        info!("wrote {}", script.display());
    }

    Ok(())
}

fn handle_fit(args: &FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(args);
    let run = pipeline::run_fit(&config)?;
    let stats = &run.ingest.stats;

    println!(
        "{}",
        crate::report::format_run_summary(&config.input.display().to_string(), stats, &[&run.fit])
    );

    if config.plot {
        let plot = crate::plot::render_ascii_plot(
            &run.ingest.points,
            &[&run.fit],
            config.plot_width,
            config.plot_height,
        );
        println!("{plot}");
    }

    if let Some(path) = &config.export_fit {
        crate::io::fit_file::write_fit_json(path, &run.fit, stats.x_min, stats.x_max)?;
        info!("wrote {}", path.display());
    }
    if let Some(basename) = &config.gnuplot {
        let script = pipeline::write_gnuplot(basename, &run.ingest.points, stats, &[&run.fit])?;
        info!("wrote {}", script.display());
    }

    Ok(())
}

fn handle_generate(args: &GenerateArgs) -> Result<(), AppError> {
    let config = generate_config_from_args(args);
    let points = pipeline::run_generate(&config)?;
    crate::io::export::write_points_csv(&config.output, &points)?;
    println!("Wrote {} points to {}", points.len(), config.output.display());
    Ok(())
}

fn handle_plot(args: &PlotArgs) -> Result<(), AppError> {
    let file = crate::io::fit_file::read_fit_json(&args.fit)?;
    let plot = crate::plot::render_ascii_plot_from_fit_file(&file, args.width, args.height);
    println!("{plot}");
    Ok(())
}

pub fn sinusoid_config_from_args(args: &SinusoidArgs) -> SinusoidConfig {
    SinusoidConfig {
        points: args.points,
        seed: args.seed,
        sigma: args.sigma,
        fourier_degree: args.fourier_degree,
        poly_degree: args.poly_degree,
        method: args.method,
        plot: args.render.plot,
        plot_width: args.render.width,
        plot_height: args.render.height,
        export: args.export.clone(),
        gnuplot: args.render.gnuplot.clone(),
    }
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        input: args.input.clone(),
        basis: BasisSpec {
            kind: args.basis,
            degree: args.degree,
            period: args.period,
        },
        method: args.method,
        plot: args.render.plot,
        plot_width: args.render.width,
        plot_height: args.render.height,
        export_fit: args.export_fit.clone(),
        gnuplot: args.render.gnuplot.clone(),
    }
}

pub fn generate_config_from_args(args: &GenerateArgs) -> GenerateConfig {
    GenerateConfig {
        amplitude: args.amplitude,
        period: args.period,
        phase: args.phase,
        points: args.points,
        x_min: args.x_min,
        x_max: args.x_max,
        sigma: args.sigma,
        seed: args.seed,
        output: args.output.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BasisKind, FitMethod};

    #[test]
    fn fit_flags_become_config() {
        let cli = Cli::parse_from([
            "linreg", "fit", "-i", "data.csv", "-b", "fourier", "-d", "2", "--period", "1.5", "--plot",
            "--gnuplot", "out/fit",
        ]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit command");
        };
        let config = fit_config_from_args(&args);
        assert_eq!(config.basis, BasisSpec::fourier(2, Some(1.5)));
        assert_eq!(config.basis.kind, BasisKind::Fourier);
        assert_eq!(config.method, FitMethod::Svd);
        assert!(config.plot);
        assert_eq!(config.gnuplot.as_deref(), Some("out/fit"));
        assert!(config.export_fit.is_none());
    }

    #[test]
    fn generate_flags_become_config() {
        let cli = Cli::parse_from([
            "linreg", "generate", "--amplitude", "3", "--x-min", "-1", "--points", "10", "-o", "out.csv",
        ]);
        let Command::Generate(args) = cli.command else {
            panic!("expected generate command");
        };
        let config = generate_config_from_args(&args);
        assert_eq!(config.amplitude, 3.0);
        assert_eq!(config.x_min, -1.0);
        assert_eq!(config.points, 10);
        assert_eq!(config.seed, 42);
        assert_eq!(config.output, std::path::PathBuf::from("out.csv"));
    }

    #[test]
    fn sinusoid_flags_become_config() {
        let cli = Cli::parse_from(["linreg", "-v", "sinusoid", "--poly-degree", "5", "--export", "t.csv"]);
        assert!(cli.verbose);
        let Command::Sinusoid(args) = cli.command else {
            panic!("expected sinusoid command");
        };
        let config = sinusoid_config_from_args(&args);
        assert_eq!(config.poly_degree, 5);
        assert_eq!(config.fourier_degree, 1);
        assert_eq!(config.export, Some(std::path::PathBuf::from("t.csv")));
        assert!(!config.plot);
    }
}
