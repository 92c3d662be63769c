//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initializes logging
//! - parses CLI arguments
//! - runs the fit pipeline
//! - shows the fit and prints the report
//! - writes synthetic samples

use std::io::IsTerminal;

use clap::Parser;
use log::{info, warn};

use crate::cli::{Command, FitArgs, SampleArgs};
use crate::domain::{FitConfig, OutputFormat, PlotMode, SampleConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `tanhfit` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is fine; it only ever carries RUST_LOG.
    let _ = dotenvy::dotenv();
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).try_init();

    // Plain `tanhfit` (and `tanhfit --data x.txt ...`) means `tanhfit fit ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(&args),
        Command::Sample(args) => handle_sample(&args),
    }
}

fn handle_fit(args: &FitArgs) -> Result<(), AppError> {
    let config = FitConfig::from(args);
    let run = pipeline::run_fit(&config)?;

    match config.plot {
        PlotMode::Window => {
            if std::io::stdout().is_terminal() {
                crate::tui::show_fit(&run.dataset, &run.fit)?;
            } else {
                warn!("stdout is not a terminal; skipping the fit viewer");
            }
        }
        PlotMode::Ascii => {
            let plot = crate::plot::render_ascii_plot(
                &run.dataset,
                &run.fit.coeffs,
                config.plot_width,
                config.plot_height,
            );
            println!("{plot}");
        }
        PlotMode::Off => {}
    }

    match config.format {
        OutputFormat::Text => print!("{}", crate::report::format_text(&run.fit, &run.predictions)),
        OutputFormat::Json => println!("{}", crate::report::format_json(&run.fit, &run.predictions)?),
    }

    Ok(())
}

fn handle_sample(args: &SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig::from(args);
    let dataset = crate::data::generate_sample(&config)?;
    crate::data::write_dataset(&config.out_path, &dataset)?;
    info!(
        "sample: a={} b={} noise={} seed={}",
        config.params.a, config.params.b, config.noise, config.seed
    );
    Ok(())
}

/// Rewrite argv so `tanhfit` defaults to `tanhfit fit`.
///
/// Rules:
/// - `tanhfit`                      -> `tanhfit fit`
/// - `tanhfit --data x.txt ...`     -> `tanhfit fit --data x.txt ...`
/// - `tanhfit --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("fit".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "sample");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "fit".to_string());
        return argv;
    }

    argv
}
