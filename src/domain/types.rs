//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - built once by the loader and shared read-only by every later stage
//! - reported as text or JSON
//! - generated synthetically for demos and tests

use std::path::PathBuf;

use clap::ValueEnum;
use nalgebra::Matrix2;
use serde::Serialize;

/// Default input file, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data.txt";

/// Default initial guess for both parameters.
pub const DEFAULT_P0: TanhParams = TanhParams { a: 0.1, b: 0.1 };

/// Reference parameters used as the default truth for synthetic samples.
pub const REFERENCE_PARAMS: TanhParams = TanhParams {
    a: 1.05631874,
    b: 0.3153276,
};

/// Paired `(x, y)` observations in input order.
///
/// Fields are private so the dataset cannot change after it is loaded.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Dataset {
    /// Build a dataset from two equal-length columns.
    ///
    /// Returns `None` when the lengths differ.
    pub fn from_columns(xs: Vec<f64>, ys: Vec<f64>) -> Option<Self> {
        if xs.len() != ys.len() {
            return None;
        }
        Some(Self { xs, ys })
    }

    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (xs, ys) = points.into_iter().unzip();
        Self { xs, ys }
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn len(&self) -> usize {
        self.xs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.xs.iter().copied().zip(self.ys.iter().copied())
    }

    /// `(x_min, x_max, y_min, y_max)` over finite values, if any.
    pub fn bounds(&self) -> Option<DatasetBounds> {
        let mut b = DatasetBounds {
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        };
        for (x, y) in self.points() {
            if !(x.is_finite() && y.is_finite()) {
                continue;
            }
            b.x_min = b.x_min.min(x);
            b.x_max = b.x_max.max(x);
            b.y_min = b.y_min.min(y);
            b.y_max = b.y_max.max(y);
        }
        if b.x_min.is_finite() && b.y_min.is_finite() {
            Some(b)
        } else {
            None
        }
    }
}

/// Summary ranges of a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Parameters of `f(x) = a * tanh(b * x)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TanhParams {
    pub a: f64,
    pub b: f64,
}

impl TanhParams {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    pub fn is_finite(&self) -> bool {
        self.a.is_finite() && self.b.is_finite()
    }
}

/// Output of the least-squares fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub coeffs: TanhParams,
    /// Estimated covariance of `(a, b)`.
    ///
    /// Every entry is `+inf` when it cannot be estimated (rank-deficient
    /// Jacobian or no residual degrees of freedom).
    pub covariance: Matrix2<f64>,
    pub sse: f64,
    pub rmse: f64,
    /// Number of residual evaluations performed by the solver.
    pub evaluations: usize,
    pub termination: String,
}

/// A fitted value at one input x.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub x: f64,
    pub y: f64,
}

/// How the fit is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlotMode {
    /// Full-screen terminal viewer; blocks until dismissed.
    Window,
    /// Fixed-size character plot printed before the report.
    Ascii,
    /// No plot.
    Off,
}

/// Report format on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Fitting options.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    /// Initial parameter guess.
    pub p0: TanhParams,
    /// Solver patience (evaluation budget is `patience * (params + 1)`).
    pub patience: usize,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            p0: DEFAULT_P0,
            patience: 100,
        }
    }
}

/// Fully-resolved configuration for a `fit` run.
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub data_path: PathBuf,
    pub fit: FitOptions,
    pub plot: PlotMode,
    pub plot_width: usize,
    pub plot_height: usize,
    pub format: OutputFormat,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            fit: FitOptions::default(),
            plot: PlotMode::Window,
            plot_width: 100,
            plot_height: 25,
            format: OutputFormat::Text,
        }
    }
}

/// Fully-resolved configuration for the synthetic sample generator.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub out_path: PathBuf,
    pub params: TanhParams,
    pub count: usize,
    pub x_min: f64,
    pub x_max: f64,
    /// Standard deviation of the additive Gaussian noise.
    pub noise: f64,
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            out_path: PathBuf::from(DEFAULT_DATA_PATH),
            params: REFERENCE_PARAMS,
            count: 100,
            x_min: -10.0,
            x_max: 10.0,
            noise: 0.02,
            seed: 42,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_rejects_mismatched_columns() {
        assert!(Dataset::from_columns(vec![1.0, 2.0], vec![1.0]).is_none());
        let ds = Dataset::from_columns(vec![1.0, 2.0], vec![3.0, 4.0]).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.points().collect::<Vec<_>>(), vec![(1.0, 3.0), (2.0, 4.0)]);
    }

    #[test]
    fn bounds_skip_non_finite_points() {
        let ds = Dataset::from_points([(0.0, 1.0), (f64::NAN, 100.0), (2.0, -1.0)]);
        let b = ds.bounds().unwrap();
        assert_eq!((b.x_min, b.x_max), (0.0, 2.0));
        assert_eq!((b.y_min, b.y_max), (-1.0, 1.0));
        assert!(Dataset::default().bounds().is_none());
    }
}
