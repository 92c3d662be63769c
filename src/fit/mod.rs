//! Curve fitting.
//!
//! Responsibilities:
//!
//! - run Levenberg–Marquardt on `a * tanh(b * x)` from the initial guess
//! - reject non-converged or non-finite solutions
//! - estimate the covariance of the fitted parameters

pub mod fitter;

pub use fitter::*;
