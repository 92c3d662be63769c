//! Nonlinear least-squares fit of `a * tanh(b * x)`.
//!
//! Given:
//! - observations `(x_i, y_i)`
//! - an initial guess `p0 = (a0, b0)`
//!
//! we minimize `Σ (a tanh(b x_i) - y_i)²` with Levenberg–Marquardt (MINPACK
//! port from the `levenberg-marquardt` crate) using the analytic Jacobian, then
//! estimate the parameter covariance at the optimum.
//!
//! The result is a local optimum near `p0`. Note the model is symmetric under
//! `(a, b) → (-a, -b)`, so the sign pair reached depends on the start.

use levenberg_marquardt::{LeastSquaresProblem, LevenbergMarquardt};
use log::{debug, warn};
use nalgebra::storage::Owned;
use nalgebra::{DMatrix, DVector, Dyn, Matrix2, OMatrix, U2, Vector2};

use crate::domain::{Dataset, FitOptions, FitResult, TanhParams};
use crate::error::AppError;
use crate::math::estimate_covariance;
use crate::models::{fill_jacobian_row, predict};

/// Number of free parameters in the model.
const N_PARAMS: usize = 2;

struct TanhProblem<'a> {
    xs: &'a [f64],
    ys: &'a [f64],
    params: Vector2<f64>,
}

impl TanhProblem<'_> {
    fn current(&self) -> TanhParams {
        TanhParams::new(self.params[0], self.params[1])
    }
}

impl LeastSquaresProblem<f64, Dyn, U2> for TanhProblem<'_> {
    type ResidualStorage = Owned<f64, Dyn>;
    type JacobianStorage = Owned<f64, Dyn, U2>;
    type ParameterStorage = Owned<f64, U2>;

    fn set_params(&mut self, p: &Vector2<f64>) {
        self.params.copy_from(p);
    }

    fn params(&self) -> Vector2<f64> {
        self.params
    }

    fn residuals(&self) -> Option<DVector<f64>> {
        let p = self.current();
        let r = DVector::from_iterator(
            self.xs.len(),
            self.xs
                .iter()
                .zip(self.ys.iter())
                .map(|(&x, &y)| predict(x, &p) - y),
        );
        // Returning `None` makes the solver stop with a failure.
        r.iter().all(|v| v.is_finite()).then_some(r)
    }

    fn jacobian(&self) -> Option<OMatrix<f64, Dyn, U2>> {
        let j = jacobian_at(self.xs, &self.current());
        j.iter().all(|v| v.is_finite()).then_some(j)
    }
}

fn jacobian_at(xs: &[f64], params: &TanhParams) -> OMatrix<f64, Dyn, U2> {
    let mut j = OMatrix::<f64, Dyn, U2>::zeros(xs.len());
    let mut row = [0.0; N_PARAMS];
    for (i, &x) in xs.iter().enumerate() {
        fill_jacobian_row(x, params, &mut row);
        j[(i, 0)] = row[0];
        j[(i, 1)] = row[1];
    }
    j
}

/// Fit `a * tanh(b * x)` to the dataset starting from `opts.p0`.
pub fn fit_tanh(dataset: &Dataset, opts: &FitOptions) -> Result<FitResult, AppError> {
    let n = dataset.len();
    if n < N_PARAMS {
        return Err(AppError::fit(format!(
            "Too few points to fit: need at least {N_PARAMS}, got {n}."
        )));
    }
    if !opts.p0.is_finite() {
        return Err(AppError::fit("Initial guess must be finite."));
    }

    let problem = TanhProblem {
        xs: dataset.xs(),
        ys: dataset.ys(),
        params: Vector2::new(opts.p0.a, opts.p0.b),
    };

    let solver = LevenbergMarquardt::new().with_patience(opts.patience.max(1));
    let (problem, report) = solver.minimize(problem);

    debug!(
        "solver stopped: {:?} after {} evaluations (objective {:.6e})",
        report.termination, report.number_of_evaluations, report.objective_function
    );

    if !report.termination.was_successful() {
        return Err(AppError::fit(format!(
            "Optimal parameters not found: {:?} after {} evaluations.",
            report.termination, report.number_of_evaluations
        )));
    }

    let coeffs = problem.current();
    if !coeffs.is_finite() {
        return Err(AppError::fit("Solver returned non-finite parameters."));
    }

    let sse: f64 = dataset
        .points()
        .map(|(x, y)| {
            let r = predict(x, &coeffs) - y;
            r * r
        })
        .sum();
    if !sse.is_finite() {
        return Err(AppError::fit("Non-finite residuals at the fitted parameters."));
    }

    let covariance = covariance_at(dataset, &coeffs, sse);

    Ok(FitResult {
        coeffs,
        covariance,
        sse,
        rmse: (sse / n as f64).sqrt(),
        evaluations: report.number_of_evaluations,
        termination: format!("{:?}", report.termination),
    })
}

fn covariance_at(dataset: &Dataset, coeffs: &TanhParams, sse: f64) -> Matrix2<f64> {
    let j = jacobian_at(dataset.xs(), coeffs);
    let j = DMatrix::from_iterator(j.nrows(), N_PARAMS, j.iter().copied());

    match estimate_covariance(&j, sse) {
        Some(cov) => Matrix2::new(cov[(0, 0)], cov[(0, 1)], cov[(1, 0)], cov[(1, 1)]),
        None => {
            warn!("Covariance of the parameters could not be estimated.");
            Matrix2::repeat(f64::INFINITY)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::REFERENCE_PARAMS;
    use rand::prelude::*;
    use rand::rngs::StdRng;
    use rand_distr::Normal;

    fn exact_dataset(params: &TanhParams, xs: &[f64]) -> Dataset {
        Dataset::from_points(xs.iter().map(|&x| (x, predict(x, params))))
    }

    fn grid(lo: f64, hi: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| lo + (hi - lo) * i as f64 / (n as f64 - 1.0))
            .collect()
    }

    #[test]
    fn recovers_parameters_from_exact_data() {
        let truth = REFERENCE_PARAMS;
        let ds = exact_dataset(&truth, &grid(-10.0, 10.0, 41));

        let fit = fit_tanh(&ds, &FitOptions::default()).unwrap();

        // `(a, b)` and `(-a, -b)` describe the same curve.
        assert!(fit.coeffs.a * fit.coeffs.b > 0.0);
        assert!((fit.coeffs.a.abs() - truth.a).abs() < 1e-6, "a = {}", fit.coeffs.a);
        assert!((fit.coeffs.b.abs() - truth.b).abs() < 1e-6, "b = {}", fit.coeffs.b);
        assert!(fit.sse < 1e-12);
        for v in fit.covariance.iter() {
            assert!(v.abs() < 1e-12, "covariance entry {v}");
        }
    }

    #[test]
    fn noisy_fit_has_positive_variances() {
        let truth = TanhParams::new(2.0, 0.5);
        let mut rng = StdRng::seed_from_u64(7);
        let noise = Normal::new(0.0, 0.05).unwrap();
        let ds = Dataset::from_points(
            grid(-6.0, 6.0, 60)
                .into_iter()
                .map(|x| (x, predict(x, &truth) + noise.sample(&mut rng))),
        );

        let fit = fit_tanh(&ds, &FitOptions::default()).unwrap();

        assert!((fit.coeffs.a.abs() - 2.0).abs() < 0.1, "a = {}", fit.coeffs.a);
        assert!((fit.coeffs.b.abs() - 0.5).abs() < 0.1, "b = {}", fit.coeffs.b);
        assert!(fit.covariance[(0, 0)] > 0.0);
        assert!(fit.covariance[(1, 1)] > 0.0);
        assert!((fit.covariance[(0, 1)] - fit.covariance[(1, 0)]).abs() < 1e-12);
        assert!(fit.rmse > 0.0 && fit.rmse < 0.2);
    }

    #[test]
    fn single_point_is_a_fit_error() {
        let ds = Dataset::from_points([(1.0, 0.5)]);
        let err = fit_tanh(&ds, &FitOptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_FIT);
    }

    #[test]
    fn non_finite_observation_is_a_fit_error() {
        let ds = Dataset::from_points([(0.0, 0.0), (1.0, f64::NAN), (2.0, 0.5)]);
        let err = fit_tanh(&ds, &FitOptions::default()).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_FIT);
    }

    #[test]
    fn two_points_fit_without_covariance() {
        // Exactly determined: a tanh(b) = 0.3 and a tanh(3b) = 0.75.
        let ds = Dataset::from_points([(1.0, 0.3), (3.0, 0.75)]);
        let fit = fit_tanh(&ds, &FitOptions::default()).unwrap();
        assert!(fit.sse < 1e-12);
        assert!(fit.covariance.iter().all(|v| *v == f64::INFINITY));
    }
}
