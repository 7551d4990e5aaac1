//! Multivariate Student's t distribution: density, moments, and EM fitting.
//!
//! This module wires the validated parameter store ([`StudentTParams`]) to the
//! EM update equations in [`em`](crate::random::models::em) and to a
//! log-space density evaluator.
//!
//! Key ideas:
//! - A Student's t variate is a Normal variate whose precision is scaled by a
//!   latent `η ~ Gamma(ν/2, ν/2)`. EM alternates between the expectations of
//!   `η` and `ln η` (E-step) and closed-form updates of location and precision
//!   plus one fixed-size gradient step on `ν` (M-step).
//! - The density is computed as `exp(ln p)` with `ln det(Λ)` taken from the
//!   Cholesky factor and the Gamma ratio from `ln_gamma`, so large `ν` or `D`
//!   do not overflow intermediate terms.
//! - `fit` mutates the model in place on every iteration; a failed fit leaves
//!   the parameters of the last completed iteration.
use crate::random::{
    core::{
        linalg::{inverse_spd, ln_det_spd, quadratic_forms},
        options::EMOptions,
        params::{ParamValue, StudentTParams},
        validation::validate_samples,
    },
    errors::{DistError, DistResult},
    models::em::{EMOutcome, EMUpdate, expectation, initial_params, maximization},
    traits::RandomVariable,
};
use ndarray::{Array1, Array2, ArrayView2};
use statrs::function::gamma::ln_gamma;
use std::f64::consts::PI;

/// Multivariate Student's t distribution `St(x | μ, Λ, ν)`.
///
/// Holds the validated parameters (location `μ`, precision `Λ`, degrees of
/// freedom `ν`), the EM configuration, and the outcome of the last fit.
///
/// # Notes
/// - Parameters may be unset; density and moment queries report
///   [`DistError::ParametersUnset`] in that case.
/// - Not internally synchronized. `fit` takes `&mut self`, so concurrent use
///   needs an external lock.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StudentT {
    params: StudentTParams,
    options: EMOptions,
    fit_outcome: Option<EMOutcome>,
}

impl StudentT {
    /// Construct a distribution from optional parameters.
    ///
    /// Parameters are assigned in the order `loc`, `precision`, `dof`, so a
    /// scalar precision expands against the dimension of `loc`. Pass
    /// [`ParamValue::Unset`] (or `None::<f64>`) for anything that should stay
    /// unset.
    ///
    /// # Errors
    /// Any error from [`set_loc`](Self::set_loc),
    /// [`set_precision`](Self::set_precision), or [`set_dof`](Self::set_dof).
    pub fn new(
        loc: impl Into<ParamValue>, precision: impl Into<ParamValue>, dof: impl Into<ParamValue>,
    ) -> DistResult<Self> {
        let params = StudentTParams::new(loc, precision, dof)?;
        Ok(StudentT { params, options: EMOptions::default(), fit_outcome: None })
    }

    /// Replace the EM configuration used by subsequent calls to [`fit`](Self::fit).
    pub fn with_options(mut self, options: EMOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &EMOptions {
        &self.options
    }

    pub fn params(&self) -> &StudentTParams {
        &self.params
    }

    /// Location vector `μ`, if set. Unlike [`mean`](Self::mean) this does not
    /// check that the mean exists.
    pub fn loc(&self) -> Option<&Array1<f64>> {
        self.params.loc()
    }

    pub fn precision(&self) -> Option<&Array2<f64>> {
        self.params.precision()
    }

    pub fn dof(&self) -> Option<f64> {
        self.params.dof()
    }

    pub fn dim(&self) -> Option<usize> {
        self.params.dim()
    }

    /// Outcome of the last successful [`fit`](Self::fit).
    pub fn fit_outcome(&self) -> Option<&EMOutcome> {
        self.fit_outcome.as_ref()
    }

    /// See [`StudentTParams::set_loc`].
    pub fn set_loc(&mut self, value: impl Into<ParamValue>) -> DistResult<()> {
        self.params.set_loc(value)
    }

    /// See [`StudentTParams::set_precision`].
    pub fn set_precision(&mut self, value: impl Into<ParamValue>) -> DistResult<()> {
        self.params.set_precision(value)
    }

    /// See [`StudentTParams::set_dof`].
    pub fn set_dof(&mut self, value: impl Into<ParamValue>) -> DistResult<()> {
        self.params.set_dof(value)
    }

    /// Mean of the distribution, which equals `μ` and exists only for `ν > 1`.
    ///
    /// # Errors
    /// - [`DistError::ParametersUnset`] if `dof` or `loc` is unset.
    /// - [`DistError::UndefinedMoment`] if `ν <= 1`.
    pub fn mean(&self) -> DistResult<&Array1<f64>> {
        let dof = self.params.require_dof()?;
        if dof > 1.0 {
            self.params.require_loc()
        } else {
            Err(DistError::UndefinedMoment { moment: "mean", dof })
        }
    }

    /// Covariance of the distribution, `Λ⁻¹ · ν / (ν - 2)`, defined for `ν > 2`.
    ///
    /// # Errors
    /// - [`DistError::ParametersUnset`] if `dof` or `precision` is unset.
    /// - [`DistError::UndefinedMoment`] if `ν <= 2`.
    pub fn variance(&self) -> DistResult<Array2<f64>> {
        let dof = self.params.require_dof()?;
        if dof <= 2.0 {
            return Err(DistError::UndefinedMoment { moment: "variance", dof });
        }
        let precision = self.params.require_precision()?;
        Ok(inverse_spd(precision.view(), "precision")? * (dof / (dof - 2.0)))
    }

    /// ln_pdf — log density at each row of `samples`.
    ///
    /// Parameters
    /// ----------
    /// - `samples`: `ArrayView2<f64>`
    ///   `n×D` matrix of points, one per row.
    ///
    /// Returns
    /// -------
    /// `DistResult<Array1<f64>>`
    ///   `ln p(x_i)` for every row, where
    ///   `ln p(x) = lnΓ((ν+D)/2) − lnΓ(ν/2) + ½ ln det Λ − (D/2) ln(πν)
    ///   − ((ν+D)/2) ln(1 + Δ²/ν)` and `Δ² = (x−μ)ᵀ Λ (x−μ)`.
    ///
    /// Errors
    /// ------
    /// - `DistError::ParametersUnset` if any parameter is unset.
    /// - `DistError::InvalidParameterType` if `ν <= 0`.
    /// - `DistError::EmptySamples`, `DistError::SampleDimMismatch`,
    ///   `DistError::NonFiniteData` for invalid input.
    ///
    /// Notes
    /// -----
    /// - `ln(1 + Δ²/ν)` is evaluated with `ln_1p`, which keeps points close
    ///   to the mode accurate.
    /// - The normalizer uses `lnΓ((ν+D)/2)`; the textbook 1-D form
    ///   `lnΓ((ν+1)/2)` agrees with it only for `D = 1`.
    pub fn ln_pdf(&self, samples: ArrayView2<f64>) -> DistResult<Array1<f64>> {
        let loc = self.params.require_loc()?;
        let precision = self.params.require_precision()?;
        let dof = self.params.require_dof()?;
        if dof <= 0.0 {
            return Err(DistError::InvalidParameterType {
                param: "dof",
                reason: "must be strictly positive to evaluate the density",
            });
        }
        let (_, d) = validate_samples(samples, Some(loc.len()))?;

        let dim = d as f64;
        let ln_norm = ln_gamma(0.5 * (dof + dim)) - ln_gamma(0.5 * dof)
            + 0.5 * ln_det_spd(precision.view(), "precision")?
            - 0.5 * dim * (PI * dof).ln();
        let resid = &samples - loc;
        let dsq = quadratic_forms(resid.view(), precision.view());
        Ok(dsq.mapv(|q| ln_norm - 0.5 * (dof + dim) * (q / dof).ln_1p()))
    }

    /// Density at each row of `samples`; `exp` of [`ln_pdf`](Self::ln_pdf).
    pub fn pdf(&self, samples: ArrayView2<f64>) -> DistResult<Array1<f64>> {
        Ok(self.ln_pdf(samples)?.mapv(f64::exp))
    }

    /// Sum of log densities of `samples` under the current parameters.
    pub fn log_likelihood(&self, samples: ArrayView2<f64>) -> DistResult<f64> {
        Ok(self.ln_pdf(samples)?.sum())
    }

    /// Estimate `μ`, `Λ`, `ν` from samples by EM and cache the outcome.
    ///
    /// ## Steps
    /// 1. Validate samples (non-empty, finite, at least two rows).
    /// 2. Initialize from the sample mean, the inverse sample covariance and
    ///    `options.init_dof`.
    /// 3. Alternate E-step and M-step. Each M-step result is validated as a
    ///    whole and only then replaces the current parameters.
    /// 4. Stop when the flat snapshot `[μ, Λ (row-major), ν]` is elementwise
    ///    close to the previous one under `options.tols`.
    /// 5. Store the iteration count and final log-likelihood in
    ///    [`fit_outcome`](Self::fit_outcome).
    ///
    /// ## Errors
    /// - Sample validation errors (`EmptySamples`, `NonFiniteData`,
    ///   `InsufficientSamples`).
    /// - `NotPositiveDefinite` if the initial or a weighted covariance is
    ///   singular.
    /// - `DegreesOfFreedomDiverged` if the dof step leaves `(0, ∞)`.
    /// - `NotConverged` if `options.max_iter` is reached first.
    ///
    /// ## Notes
    /// - With `options.max_iter = None` the loop has no iteration cap.
    /// - The algorithm is deterministic: identical samples and options give
    ///   bit-identical parameters.
    pub fn fit(&mut self, samples: ArrayView2<f64>) -> DistResult<()> {
        let (n, _) = validate_samples(samples, None)?;
        let init = initial_params(samples, self.options.init_dof)?;
        self.fit_outcome = None;
        self.apply_update(init)?;
        let mut snapshot = self.params.flatten();
        let mut iteration = 0;

        loop {
            iteration += 1;
            let update = {
                let loc = self.params.require_loc()?;
                let precision = self.params.require_precision()?;
                let dof = self.params.require_dof()?;
                let exp = expectation(samples, loc.view(), precision.view(), dof);
                maximization(samples, &exp, dof, &self.options)?
            };
            if !update.dof.is_finite() || update.dof <= 0.0 {
                log::warn!("EM stopped: dof diverged to {} at iteration {iteration}", update.dof);
                return Err(DistError::DegreesOfFreedomDiverged { dof: update.dof, iteration });
            }
            self.apply_update(update)?;

            let next = self.params.flatten();
            let max_change =
                snapshot.iter().zip(&next).map(|(a, b)| (a - b).abs()).fold(0.0, f64::max);
            log::debug!(
                "EM iteration {iteration}: dof = {:.6}, max |Δθ| = {max_change:.3e}",
                self.params.dof().unwrap_or(f64::NAN)
            );
            if self.options.tols.all_close(&snapshot, &next) {
                break;
            }
            if self.options.max_iter.is_some_and(|max_iter| iteration >= max_iter) {
                log::warn!("EM stopped without converging after {iteration} iterations");
                return Err(DistError::NotConverged { iterations: iteration });
            }
            snapshot = next;
        }

        let log_likelihood = self.log_likelihood(samples)?;
        log::info!(
            "EM converged after {iteration} iterations (n = {n}, log-likelihood = {log_likelihood:.6})"
        );
        self.fit_outcome = Some(EMOutcome { iterations: iteration, log_likelihood });
        Ok(())
    }

    /// Replace all three parameters at once; on error the model is unchanged.
    fn apply_update(&mut self, update: EMUpdate) -> DistResult<()> {
        self.params = StudentTParams::new(update.loc, update.precision, update.dof)?;
        Ok(())
    }
}

impl RandomVariable for StudentT {
    fn fit(&mut self, samples: ArrayView2<f64>) -> DistResult<()> {
        StudentT::fit(self, samples)
    }

    fn pdf(&self, samples: ArrayView2<f64>) -> DistResult<Array1<f64>> {
        StudentT::pdf(self, samples)
    }
}

impl std::fmt::Display for StudentT {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Student's T(")?;
        match self.params.loc() {
            Some(loc) => writeln!(f, "mu={loc},")?,
            None => writeln!(f, "mu=None,")?,
        }
        writeln!(f, "precision=")?;
        match self.params.precision() {
            Some(precision) => writeln!(f, "{precision},")?,
            None => writeln!(f, "None,")?,
        }
        match self.params.dof() {
            Some(dof) => writeln!(f, "dof={dof}")?,
            None => writeln!(f, "dof=None")?,
        }
        write!(f, ")")
    }
}
