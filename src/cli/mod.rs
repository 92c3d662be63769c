//! Command-line parsing for the tanh curve fitter.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! fitting/reporting code. Every default reproduces the plain `tanhfit` run:
//! fit `data.txt` from `p0 = (0.1, 0.1)`, show the viewer, print text.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{
    FitConfig, FitOptions, OutputFormat, PlotMode, SampleConfig, TanhParams, DEFAULT_DATA_PATH, REFERENCE_PARAMS,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "tanhfit", version, about = "Fit y = a*tanh(b*x) to tab-delimited data")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit the data file, show the fit, and print coefficients, covariance and fitted values.
    Fit(FitArgs),
    /// Write a synthetic noisy a*tanh(b*x) data file.
    Sample(SampleArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Tab-delimited input (first field x, last field y).
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Initial guess for a.
    #[arg(long, default_value_t = 0.1, allow_hyphen_values = true)]
    pub a0: f64,

    /// Initial guess for b.
    #[arg(long, default_value_t = 0.1, allow_hyphen_values = true)]
    pub b0: f64,

    /// Solver patience (evaluation budget is patience * 3).
    #[arg(long, default_value_t = 100)]
    pub patience: usize,

    /// How to show the fit.
    #[arg(long, value_enum, default_value_t = PlotMode::Window)]
    pub plot: PlotMode,

    /// ASCII plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// ASCII plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Report format on stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Output file.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DATA_PATH)]
    pub out: PathBuf,

    /// Number of points.
    #[arg(short = 'n', long, default_value_t = 100)]
    pub count: usize,

    /// True amplitude a.
    #[arg(long, default_value_t = REFERENCE_PARAMS.a, allow_hyphen_values = true)]
    pub a: f64,

    /// True steepness b.
    #[arg(long, default_value_t = REFERENCE_PARAMS.b, allow_hyphen_values = true)]
    pub b: f64,

    /// Smallest x.
    #[arg(long, default_value_t = -10.0, allow_hyphen_values = true)]
    pub x_min: f64,

    /// Largest x.
    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    pub x_max: f64,

    /// Standard deviation of the Gaussian noise added to y.
    #[arg(long, default_value_t = 0.02)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl From<&FitArgs> for FitConfig {
    fn from(args: &FitArgs) -> Self {
        FitConfig {
            data_path: args.data.clone(),
            fit: FitOptions {
                p0: TanhParams::new(args.a0, args.b0),
                patience: args.patience,
            },
            plot: args.plot,
            plot_width: args.width,
            plot_height: args.height,
            format: args.format,
        }
    }
}

impl From<&SampleArgs> for SampleConfig {
    fn from(args: &SampleArgs) -> Self {
        SampleConfig {
            out_path: args.out.clone(),
            params: TanhParams::new(args.a, args.b),
            count: args.count,
            x_min: args.x_min,
            x_max: args.x_max,
            noise: args.noise,
            seed: args.seed,
        }
    }
}
