//! `tanhfit` library crate.
//!
//! Fits `y = a * tanh(b * x)` to tab-delimited data, shows the fit and prints
//! the coefficients, their covariance and the fitted values.
//!
//! The binary is a thin wrapper around this library so that every pipeline
//! stage (load, fit, plot, report) is testable without spawning processes.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;
