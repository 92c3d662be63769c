//! Formatted stdout output.
//!
//! The text report has three parts, in order:
//! 1. the coefficient pair `[a b]`
//! 2. the 2×2 covariance matrix
//! 3. one `x y_fit` line per input point, in input order, as floats in
//!    shortest round-trip form (`0.0`, not `0`)

use serde::Serialize;

use crate::domain::{FitResult, Prediction, TanhParams};
use crate::error::AppError;

/// Format the plain-text report.
pub fn format_text(fit: &FitResult, predictions: &[Prediction]) -> String {
    let mut out = String::new();

    out.push_str(&format!("[{:.8} {:.8}]\n", fit.coeffs.a, fit.coeffs.b));

    let c = &fit.covariance;
    out.push_str(&format!("[[{} {}]\n", fmt_cov(c[(0, 0)]), fmt_cov(c[(0, 1)])));
    out.push_str(&format!(" [{} {}]]\n", fmt_cov(c[(1, 0)]), fmt_cov(c[(1, 1)])));

    for p in predictions {
        out.push_str(&format!("{:?} {:?}\n", p.x, p.y));
    }

    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    coeffs: TanhParams,
    covariance: [[f64; 2]; 2],
    sse: f64,
    rmse: f64,
    evaluations: usize,
    termination: &'a str,
    predictions: &'a [Prediction],
}

/// Format the report as one pretty-printed JSON object.
///
/// Non-finite numbers (e.g. an unavailable covariance) become `null`.
pub fn format_json(fit: &FitResult, predictions: &[Prediction]) -> Result<String, AppError> {
    let c = &fit.covariance;
    let report = JsonReport {
        coeffs: fit.coeffs,
        covariance: [[c[(0, 0)], c[(0, 1)]], [c[(1, 0)], c[(1, 1)]]],
        sse: fit.sse,
        rmse: fit.rmse,
        evaluations: fit.evaluations,
        termination: &fit.termination,
        predictions,
    };

    serde_json::to_string_pretty(&report)
        .map_err(|e| AppError::report(format!("Failed to serialize report: {e}")))
}

fn fmt_cov(v: f64) -> String {
    format!("{v:>14.8e}")
}
