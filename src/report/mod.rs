//! Reporting utilities: fitted values and formatted output.

pub mod format;

pub use format::*;

use crate::domain::{Dataset, Prediction, TanhParams};
use crate::models::predict;

/// Evaluate the fitted model at every dataset x, in input order.
pub fn compute_predictions(dataset: &Dataset, coeffs: &TanhParams) -> Vec<Prediction> {
    dataset
        .xs()
        .iter()
        .map(|&x| Prediction {
            x,
            y: predict(x, coeffs),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predictions_recompute_the_model_exactly() {
        let ds = Dataset::from_points([(3.0, 9.0), (-1.0, 0.0), (0.0, 1.0), (0.5, 0.5)]);
        let coeffs = TanhParams::new(1.05631874, 0.3153276);

        let preds = compute_predictions(&ds, &coeffs);

        assert_eq!(preds.len(), 4);
        for (p, &x) in preds.iter().zip(ds.xs()) {
            assert_eq!(p.x, x);
            assert_eq!(p.y, coeffs.a * (coeffs.b * x).tanh());
        }
    }
}
