//! EM internals for the Student's t model: initialization, E-step, M-step.
//!
//! Purpose
//! -------
//! Implement the update equations of the Gamma-mixture EM algorithm as pure
//! functions over `ndarray` views. The driver loop, convergence test, and
//! mutation of the model live in [`StudentT::fit`]; this module only turns
//! current parameters and samples into new parameters.
//!
//! Key behaviors
//! -------------
//! - [`initial_params`]: sample mean, inverse sample covariance (`ddof = 1`),
//!   and the configured starting dof.
//! - [`expectation`]: per-sample `E[η]` and `E[ln η]` of the latent precision
//!   scale, given `a = (ν + D)/2` and `b_i = (ν + Δ_i²)/2`.
//! - [`maximization`]: weighted location, inverse population covariance of the
//!   `sqrt(E[η])`-scaled residuals, and one fixed-step gradient update of `ν`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Samples were validated upstream (finite, `n >= 2`, `d >= 1`).
//! - `dof > 0` on entry to [`expectation`] and [`maximization`]; the caller
//!   checks the returned dof before the next iteration.
//! - No logging and no mutation here.
//!
//! [`StudentT::fit`]: crate::random::models::student_t::StudentT::fit
use crate::random::{
    core::{
        linalg::{covariance, inverse_spd, quadratic_forms},
        options::{EMOptions, MeanUpdate},
    },
    errors::{DistError, DistResult},
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};
use statrs::function::gamma::digamma;

/// New parameter values produced by initialization or an M-step.
#[derive(Debug, Clone, PartialEq)]
pub struct EMUpdate {
    pub loc: Array1<f64>,
    pub precision: Array2<f64>,
    pub dof: f64,
}

/// Latent expectations from one E-step.
#[derive(Debug, Clone, PartialEq)]
pub struct Expectations {
    /// `E[η_i] = a / b_i`.
    pub e_eta: Array1<f64>,
    /// `E[ln η_i] = ψ(a) - ln b_i`.
    pub e_ln_eta: Array1<f64>,
}

/// Summary of a successful fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EMOutcome {
    /// Number of E/M iterations run, including the converging one.
    pub iterations: usize,
    /// Sum of log densities of the fitted samples at the final parameters.
    pub log_likelihood: f64,
}

/// Starting point of EM.
///
/// # Errors
/// - [`DistError::InsufficientSamples`] if `n < 2`.
/// - [`DistError::NotPositiveDefinite`] if the sample covariance is singular
///   (e.g. a constant column or collinear columns).
pub fn initial_params(samples: ArrayView2<f64>, init_dof: f64) -> DistResult<EMUpdate> {
    let n = samples.nrows();
    let loc = match samples.mean_axis(Axis(0)) {
        Some(loc) if n >= 2 => loc,
        _ => return Err(DistError::InsufficientSamples { n }),
    };
    let precision = inverse_spd(covariance(samples, 1).view(), "sample covariance")?;
    Ok(EMUpdate { loc, precision, dof: init_dof })
}

/// E-step: expectations of the latent precision scale for every sample.
pub fn expectation(
    samples: ArrayView2<f64>, loc: ArrayView1<f64>, precision: ArrayView2<f64>, dof: f64,
) -> Expectations {
    let dim = samples.ncols() as f64;
    let resid = &samples - &loc;
    let a = 0.5 * (dof + dim);
    let b = quadratic_forms(resid.view(), precision).mapv(|q| 0.5 * (dof + q));
    let psi_a = digamma(a);
    Expectations { e_eta: b.mapv(|b_i| a / b_i), e_ln_eta: b.mapv(|b_i| psi_a - b_i.ln()) }
}

/// M-step: new location, precision and degrees of freedom.
///
/// Parameters
/// ----------
/// - `samples`: `ArrayView2<f64>`
///   `n×d` data, one observation per row.
/// - `exp`: `&Expectations`
///   Output of [`expectation`] at the current parameters.
/// - `dof`: `f64`
///   Degrees of freedom used in that E-step; the update is taken from here.
/// - `opts`: `&EMOptions`
///   Supplies the location-update policy and the dof learning rate.
///
/// Returns
/// -------
/// `DistResult<EMUpdate>`
///   - `loc`: pooled scalar broadcast to all `d` entries, or per-column
///     weighted means, depending on `opts.mean_update`.
///   - `precision`: inverse of the population covariance (divisor `n`) of
///     the rows `sqrt(E[η_i]) · (x_i - loc)`.
///   - `dof`: `ν + lr · [n ln(ν/2) + n - n ψ(ν/2) + Σ_i (E[ln η_i] - E[η_i])]`.
///
/// Errors
/// ------
/// - `DistError::NotPositiveDefinite`
///   If the weighted covariance cannot be inverted.
///
/// Notes
/// -----
/// - The returned dof is not checked for positivity; the driver does that so
///   it can report the iteration number.
pub fn maximization(
    samples: ArrayView2<f64>, exp: &Expectations, dof: f64, opts: &EMOptions,
) -> DistResult<EMUpdate> {
    let (n, d) = samples.dim();
    let n_f = n as f64;
    let weight_sum = exp.e_eta.sum();

    let loc = match opts.mean_update {
        MeanUpdate::Pooled => {
            let pooled = (&samples * &exp.e_eta.view().insert_axis(Axis(1))).sum() / weight_sum;
            Array1::from_elem(d, pooled)
        }
        MeanUpdate::PerDimension => samples.t().dot(&exp.e_eta) / weight_sum,
    };

    let resid = &samples - &loc;
    let scaled = &resid * &exp.e_eta.mapv(f64::sqrt).insert_axis(Axis(1));
    let precision = inverse_spd(covariance(scaled.view(), 0).view(), "weighted covariance")?;

    let half_dof = 0.5 * dof;
    let latent_term: f64 = (&exp.e_ln_eta - &exp.e_eta).sum();
    let grad = n_f * half_dof.ln() + n_f - n_f * digamma(half_dof) + latent_term;
    let dof = dof + opts.learning_rate * grad;

    Ok(EMUpdate { loc, precision, dof })
}
