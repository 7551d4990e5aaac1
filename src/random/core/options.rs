//! EM options — configuration for Student's t parameter estimation.
//!
//! Purpose
//! -------
//! Collect the knobs of the EM fitter in one validated place: convergence
//! tolerances, the fixed step size of the degrees-of-freedom update, an
//! optional iteration cap, the location-update policy, and the starting
//! degrees of freedom.
//!
//! Key behaviors
//! -------------
//! - [`Tolerances`] holds the elementwise closeness test
//!   `|old - new| <= atol + rtol * |new|` used between EM snapshots.
//! - [`MeanUpdate`] selects between the pooled scalar location update and a
//!   per-dimension weighted mean.
//! - [`EMOptions`] bundles everything; `EMOptions::default()` reproduces the
//!   classic behavior (rtol = 1e-5, atol = 1e-8, step 0.01, no cap, pooled
//!   update, dof starting at 1).
//!
//! Invariants & assumptions
//! ------------------------
//! - Tolerances are finite and non-negative.
//! - The learning rate and the starting dof are finite and strictly positive.
//! - `max_iter`, when present, is at least 1. `None` means the loop only stops
//!   on convergence or on an error.
//!
//! Downstream usage
//! ----------------
//! - Build once and hand to [`StudentT::with_options`]; the model keeps its
//!   own copy and consults it on every `fit`.
//!
//! [`StudentT::with_options`]: crate::random::models::student_t::StudentT::with_options
use crate::random::{
    core::validation::{
        validate_init_dof, validate_learning_rate, validate_max_iter, validate_tolerance,
    },
    errors::DistResult,
};

/// Default relative tolerance of the convergence test.
pub const DEFAULT_RTOL: f64 = 1e-5;
/// Default absolute tolerance of the convergence test.
pub const DEFAULT_ATOL: f64 = 1e-8;
/// Default step size of the degrees-of-freedom gradient update.
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;
/// Default degrees of freedom used to start EM.
pub const DEFAULT_INIT_DOF: f64 = 1.0;

/// Elementwise closeness tolerances between consecutive parameter snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    /// Relative tolerance (scaled by the magnitude of the newer value).
    pub rtol: f64,
    /// Absolute tolerance.
    pub atol: f64,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// Returns [`DistError::InvalidTolerance`] if either value is negative or
    /// non-finite.
    ///
    /// [`DistError::InvalidTolerance`]: crate::random::errors::DistError::InvalidTolerance
    pub fn new(rtol: f64, atol: f64) -> DistResult<Self> {
        let rtol = validate_tolerance(rtol)?;
        let atol = validate_tolerance(atol)?;
        Ok(Tolerances { rtol, atol })
    }

    /// `true` when every pair satisfies `|old - new| <= atol + rtol * |new|`.
    ///
    /// Slices of different lengths are never close. A NaN on either side makes
    /// the pair not close.
    pub fn all_close(&self, old: &[f64], new: &[f64]) -> bool {
        old.len() == new.len()
            && old.iter().zip(new).all(|(&a, &b)| (a - b).abs() <= self.atol + self.rtol * b.abs())
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Tolerances { rtol: DEFAULT_RTOL, atol: DEFAULT_ATOL }
    }
}

/// Location update used in the M-step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeanUpdate {
    /// One scalar, `Σ_i Σ_j w_i x_ij / Σ_i w_i`, broadcast to every
    /// dimension. Identical to the weighted mean when `D = 1`.
    #[default]
    Pooled,
    /// Weighted mean per column, `loc_j = Σ_i w_i x_ij / Σ_i w_i`.
    PerDimension,
}

/// EMOptions — estimation-time configuration for the Student's t fitter.
///
/// Fields
/// ------
/// - `tols`: [`Tolerances`]
///   Convergence test between consecutive parameter snapshots.
/// - `learning_rate`: `f64`
///   Fixed step of the gradient-ascent update of the degrees of freedom.
/// - `max_iter`: `Option<usize>`
///   Iteration cap. `None` keeps iterating until convergence.
/// - `mean_update`: [`MeanUpdate`]
///   Location-update policy.
/// - `init_dof`: `f64`
///   Degrees of freedom at the start of EM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EMOptions {
    pub tols: Tolerances,
    pub learning_rate: f64,
    pub max_iter: Option<usize>,
    pub mean_update: MeanUpdate,
    pub init_dof: f64,
}

impl EMOptions {
    /// Construct validated EM options.
    ///
    /// # Errors
    /// - [`DistError::InvalidLearningRate`] for a non-positive or non-finite step.
    /// - [`DistError::InvalidMaxIter`] for `Some(0)`.
    /// - [`DistError::InvalidInitDof`] for a non-positive or non-finite start.
    ///
    /// [`DistError::InvalidLearningRate`]: crate::random::errors::DistError::InvalidLearningRate
    /// [`DistError::InvalidMaxIter`]: crate::random::errors::DistError::InvalidMaxIter
    /// [`DistError::InvalidInitDof`]: crate::random::errors::DistError::InvalidInitDof
    pub fn new(
        tols: Tolerances, learning_rate: f64, max_iter: Option<usize>, mean_update: MeanUpdate,
        init_dof: f64,
    ) -> DistResult<Self> {
        let learning_rate = validate_learning_rate(learning_rate)?;
        let max_iter = validate_max_iter(max_iter)?;
        let init_dof = validate_init_dof(init_dof)?;
        Ok(EMOptions { tols, learning_rate, max_iter, mean_update, init_dof })
    }
}

impl Default for EMOptions {
    fn default() -> Self {
        EMOptions {
            tols: Tolerances::default(),
            learning_rate: DEFAULT_LEARNING_RATE,
            max_iter: None,
            mean_update: MeanUpdate::Pooled,
            init_dof: DEFAULT_INIT_DOF,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::errors::DistError;

    #[test]
    fn default_options_match_classic_em_settings() {
        let opts = EMOptions::default();

        assert_eq!(opts.tols.rtol, 1e-5);
        assert_eq!(opts.tols.atol, 1e-8);
        assert_eq!(opts.learning_rate, 0.01);
        assert_eq!(opts.max_iter, None);
        assert_eq!(opts.mean_update, MeanUpdate::Pooled);
        assert_eq!(opts.init_dof, 1.0);
    }

    #[test]
    fn em_options_new_preserves_inputs() {
        let tols = Tolerances::new(1e-6, 1e-10).unwrap();

        let opts = EMOptions::new(tols, 0.005, Some(500), MeanUpdate::PerDimension, 3.0).unwrap();

        assert_eq!(opts.tols, tols);
        assert_eq!(opts.learning_rate, 0.005);
        assert_eq!(opts.max_iter, Some(500));
        assert_eq!(opts.mean_update, MeanUpdate::PerDimension);
        assert_eq!(opts.init_dof, 3.0);
    }

    #[test]
    fn em_options_new_rejects_invalid_components() {
        let tols = Tolerances::default();

        assert!(matches!(
            EMOptions::new(tols, -0.1, None, MeanUpdate::Pooled, 1.0),
            Err(DistError::InvalidLearningRate { .. })
        ));
        assert!(matches!(
            EMOptions::new(tols, 0.01, Some(0), MeanUpdate::Pooled, 1.0),
            Err(DistError::InvalidMaxIter { .. })
        ));
        assert!(matches!(
            EMOptions::new(tols, 0.01, None, MeanUpdate::Pooled, 0.0),
            Err(DistError::InvalidInitDof { .. })
        ));
        assert!(matches!(Tolerances::new(-1.0, 0.0), Err(DistError::InvalidTolerance { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Pin down the asymmetric closeness rule: the relative term scales with
    // the newer value, as in the convergence test between snapshots.
    //
    // Given
    // -----
    // - rtol = 0.1, atol = 0.
    //
    // Expect
    // ------
    // - old = 0.95, new = 1.0 is close (0.05 <= 0.1).
    // - old = 1.0, new = 0.5 is not close (0.5 > 0.05).
    // - Length mismatch and NaN are never close.
    fn all_close_scales_relative_term_by_new_value() {
        let tols = Tolerances::new(0.1, 0.0).unwrap();

        assert!(tols.all_close(&[0.95], &[1.0]));
        assert!(!tols.all_close(&[1.0], &[0.5]));
        assert!(!tols.all_close(&[1.0], &[1.0, 1.0]));
        assert!(!tols.all_close(&[f64::NAN], &[f64::NAN]));
    }
}
