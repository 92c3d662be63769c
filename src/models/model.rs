//! Evaluation of `f(x; a, b) = a * tanh(b * x)`.
//!
//! The fitter relies on two primitive operations:
//! - predict `f(x)` given the parameters (for residuals, plots and reports)
//! - fill the Jacobian row `∂f/∂(a, b)` at one x (for the solver)

use crate::domain::TanhParams;

/// Predict `a * tanh(b * x)`.
pub fn predict(x: f64, params: &TanhParams) -> f64 {
    params.a * (params.b * x).tanh()
}

/// Fill the Jacobian row of `f` with respect to `(a, b)`.
///
/// - `∂f/∂a = tanh(b x)`
/// - `∂f/∂b = a x sech²(b x) = a x (1 - tanh²(b x))`
pub fn fill_jacobian_row(x: f64, params: &TanhParams, out: &mut [f64; 2]) {
    let t = (params.b * x).tanh();
    out[0] = t;
    out[1] = params.a * x * (1.0 - t * t);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_is_zero_at_origin() {
        for &(a, b) in &[(1.0, 1.0), (-3.5, 0.2), (0.0, 7.0), (1e6, -1e-6)] {
            assert_eq!(predict(0.0, &TanhParams::new(a, b)), 0.0);
        }
    }

    #[test]
    fn predict_is_odd_in_x() {
        let p = TanhParams::new(1.05631874, 0.3153276);
        for &x in &[0.1, 0.5, 1.0, 3.0, 12.5, 100.0] {
            assert_eq!(predict(-x, &p), -predict(x, &p));
        }
    }

    #[test]
    fn predict_saturates_at_amplitude() {
        let p = TanhParams::new(2.0, 1.0);
        assert!((predict(50.0, &p) - 2.0).abs() < 1e-12);
        assert!((predict(-50.0, &p) + 2.0).abs() < 1e-12);
    }

    #[test]
    fn jacobian_matches_finite_differences() {
        let p = TanhParams::new(1.3, 0.4);
        let h = 1e-6;
        for &x in &[-4.0, -0.5, 0.0, 0.7, 2.0, 6.0] {
            let mut row = [0.0; 2];
            fill_jacobian_row(x, &p, &mut row);

            let da = (predict(x, &TanhParams::new(p.a + h, p.b))
                - predict(x, &TanhParams::new(p.a - h, p.b)))
                / (2.0 * h);
            let db = (predict(x, &TanhParams::new(p.a, p.b + h))
                - predict(x, &TanhParams::new(p.a, p.b - h)))
                / (2.0 * h);

            assert!((row[0] - da).abs() < 1e-7, "d/da at x={x}: {} vs {da}", row[0]);
            assert!((row[1] - db).abs() < 1e-7, "d/db at x={x}: {} vs {db}", row[1]);
        }
    }
}
