//! Command-line parsing for the `linreg` binary.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{BasisKind, FitMethod};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "linreg", version, about = "Linear regression against basis-function sets")]
pub struct Cli {
    /// Log fit details (equivalent to RUST_LOG=debug).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit noisy Fourier data with a Fourier and a polynomial basis and compare.
    Sinusoid(SinusoidArgs),
    /// Fit a basis to an (x, y) CSV file.
    Fit(FitArgs),
    /// Write a synthetic (x, y) CSV from a noisy sinusoid.
    Generate(GenerateArgs),
    /// Plot a previously exported fit JSON.
    Plot(PlotArgs),
}

/// Output options shared by commands that render fits.
#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    /// Render an ASCII plot in the terminal.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Write gnuplot input (BASENAME.gpi + BASENAME{k}.dat).
    #[arg(long, value_name = "BASENAME")]
    pub gnuplot: Option<String>,
}

/// Options for the sinusoid demo.
#[derive(Debug, Parser, Clone)]
pub struct SinusoidArgs {
    /// Number of measurements on [0, 2π].
    #[arg(short = 'n', long, default_value_t = 100)]
    pub points: usize,

    /// Random seed for the noise.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// Standard deviation of the Gaussian noise.
    #[arg(long, default_value_t = 1.0)]
    pub sigma: f64,

    /// Degree of the Fourier basis (also generates the data).
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub fourier_degree: i64,

    /// Degree of the polynomial basis.
    #[arg(long, default_value_t = 3, allow_negative_numbers = true)]
    pub poly_degree: i64,

    /// Least-squares method.
    #[arg(long, value_enum, default_value_t = FitMethod::Svd)]
    pub method: FitMethod,

    /// Write `x,y,fourier,polynomial` rows to CSV instead of printing them.
    #[arg(long)]
    pub export: Option<PathBuf>,

    #[command(flatten)]
    pub render: RenderArgs,
}

/// Options for fitting a CSV file.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// CSV file with `x` and `y` columns.
    #[arg(short, long, value_name = "CSV")]
    pub input: PathBuf,

    /// Basis family.
    #[arg(short, long, value_enum, default_value_t = BasisKind::Polynomial)]
    pub basis: BasisKind,

    /// Polynomial degree or number of Fourier harmonics.
    #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
    pub degree: i64,

    /// Fundamental period of the Fourier basis (default 2π).
    #[arg(long)]
    pub period: Option<f64>,

    /// Least-squares method.
    #[arg(long, value_enum, default_value_t = FitMethod::Svd)]
    pub method: FitMethod,

    /// Export the fit (coefficients + fitted grid) to JSON.
    #[arg(long = "export-fit", value_name = "JSON")]
    pub export_fit: Option<PathBuf>,

    #[command(flatten)]
    pub render: RenderArgs,
}

/// Options for synthetic data generation.
#[derive(Debug, Parser, Clone)]
pub struct GenerateArgs {
    /// Sinusoid amplitude.
    #[arg(long, default_value_t = 1.0)]
    pub amplitude: f64,

    /// Sinusoid period.
    #[arg(long, default_value_t = std::f64::consts::TAU)]
    pub period: f64,

    /// Sinusoid phase (radians; 0 is a sine).
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub phase: f64,

    /// Number of points.
    #[arg(short = 'n', long, default_value_t = 100)]
    pub points: usize,

    /// Lower bound of the abscissa.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub x_min: f64,

    /// Upper bound of the abscissa.
    #[arg(long, default_value_t = std::f64::consts::TAU, allow_negative_numbers = true)]
    pub x_max: f64,

    /// Standard deviation of the Gaussian noise.
    #[arg(long, default_value_t = 0.1)]
    pub sigma: f64,

    /// Random seed for the noise.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Destination CSV.
    #[arg(short, long, value_name = "CSV")]
    pub output: PathBuf,
}

/// Options for plotting a saved fit.
#[derive(Debug, Parser)]
pub struct PlotArgs {
    /// Fit JSON file produced by `linreg fit --export-fit`.
    #[arg(long, value_name = "JSON")]
    pub fit: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_degree_reaches_the_library() {
        let cli = Cli::parse_from(["linreg", "fit", "-i", "data.csv", "--degree", "-1"]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit command");
        };
        assert_eq!(args.degree, -1);
        assert_eq!(args.basis, BasisKind::Polynomial);
        assert_eq!(args.method, FitMethod::Svd);
    }

    #[test]
    fn sinusoid_defaults_match_demo() {
        let cli = Cli::parse_from(["linreg", "sinusoid", "--method", "simple", "--plot"]);
        let Command::Sinusoid(args) = cli.command else {
            panic!("expected sinusoid command");
        };
        assert_eq!(args.points, 100);
        assert_eq!(args.fourier_degree, 1);
        assert_eq!(args.poly_degree, 3);
        assert_eq!(args.method, FitMethod::Simple);
        assert!(args.render.plot);
    }
}
