//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the loaded observations (`Dataset`)
//! - model parameters and fit outputs (`TanhParams`, `FitResult`, `Prediction`)
//! - resolved run configuration (`FitConfig`, `SampleConfig`, `PlotMode`, `OutputFormat`)

pub mod types;

pub use types::*;
