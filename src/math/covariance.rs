//! Parameter covariance of a least-squares fit.
//!
//! For residuals `r(p)` with Jacobian `J` at the optimum, the estimated
//! covariance of the parameters is
//!
//! ```text
//! cov = (JᵀJ)⁻¹ · s²,   s² = SSE / (n - p)
//! ```
//!
//! Implementation choices:
//! - `(JᵀJ)⁻¹` is formed from the SVD of `J` (`V Σ⁻² Vᵀ`) rather than by
//!   inverting the normal matrix, which would square the condition number.
//! - Singular values below `ε · max(n, p) · σ_max` count as zero. A Jacobian
//!   with any such direction is rank deficient and yields no estimate.

use nalgebra::DMatrix;

/// Estimate the parameter covariance from the Jacobian at the optimum.
///
/// Returns `None` when there are no residual degrees of freedom (`n <= p`) or
/// the Jacobian is rank deficient.
pub fn estimate_covariance(jacobian: &DMatrix<f64>, sse: f64) -> Option<DMatrix<f64>> {
    let (n, p) = jacobian.shape();
    if p == 0 || n <= p || !sse.is_finite() {
        return None;
    }

    let svd = jacobian.clone().svd(false, true);
    let v_t = svd.v_t.as_ref()?;
    let s = &svd.singular_values;

    let s_max = s.max();
    if !(s_max.is_finite() && s_max > 0.0) {
        return None;
    }
    let threshold = f64::EPSILON * n.max(p) as f64 * s_max;
    if s.len() < p || s.iter().any(|&v| v <= threshold) {
        return None;
    }

    let s_sq = sse / (n - p) as f64;

    // V Σ⁻² Vᵀ, accumulated one singular direction at a time.
    let mut cov = DMatrix::<f64>::zeros(p, p);
    for (k, &sk) in s.iter().enumerate() {
        let inv = 1.0 / (sk * sk);
        let v = v_t.row(k);
        for i in 0..p {
            for j in 0..p {
                cov[(i, j)] += inv * v[i] * v[j];
            }
        }
    }

    cov *= s_sq;
    if cov.iter().all(|v| v.is_finite()) {
        Some(cov)
    } else {
        None
    }
}
