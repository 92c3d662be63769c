//! The fit pipeline: load → fit → predictions.
//!
//! Everything that can fail on the input runs here, before any output, so a
//! failed run prints no partial results. Presentation (viewer, ASCII plot,
//! report) is left to the caller.

use log::info;

use crate::domain::{Dataset, FitConfig, FitResult, Prediction};
use crate::error::AppError;

/// All computed outputs of a single `tanhfit fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: Dataset,
    pub fit: FitResult,
    pub predictions: Vec<Prediction>,
}

/// Execute the pipeline for the configured data file.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let dataset = crate::io::load_dataset(&config.data_path)?;
    run_fit_on(dataset, config)
}

/// Execute the pipeline on an already-loaded dataset.
pub fn run_fit_on(dataset: Dataset, config: &FitConfig) -> Result<RunOutput, AppError> {
    let fit = crate::fit::fit_tanh(&dataset, &config.fit)?;
    info!(
        "fit a={:.8} b={:.8} sse={:.6e} ({} evaluations)",
        fit.coeffs.a, fit.coeffs.b, fit.sse, fit.evaluations
    );

    let predictions = crate::report::compute_predictions(&dataset, &fit.coeffs);

    Ok(RunOutput {
        dataset,
        fit,
        predictions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{generate_sample, write_dataset};
    use crate::domain::{PlotMode, SampleConfig, REFERENCE_PARAMS};

    #[test]
    fn run_fit_on_sample_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        let sample = generate_sample(&SampleConfig {
            count: 80,
            noise: 0.01,
            ..SampleConfig::default()
        })
        .unwrap();
        write_dataset(&path, &sample).unwrap();

        let config = FitConfig {
            data_path: path,
            plot: PlotMode::Off,
            ..FitConfig::default()
        };
        let run = run_fit(&config).unwrap();

        assert_eq!(run.dataset.len(), 80);
        assert_eq!(run.predictions.len(), 80);
        assert!((run.fit.coeffs.a.abs() - REFERENCE_PARAMS.a).abs() < 0.05);
        assert!((run.fit.coeffs.b.abs() - REFERENCE_PARAMS.b).abs() < 0.05);
        for (p, &x) in run.predictions.iter().zip(run.dataset.xs()) {
            assert_eq!(p.x, x);
        }
    }

    #[test]
    fn malformed_file_fails_before_fitting() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        std::fs::write(&path, "0\t0\n1\tx\n2\t0.5\n").unwrap();

        let config = FitConfig {
            data_path: path,
            ..FitConfig::default()
        };
        let err = run_fit(&config).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_INPUT);
    }
}
