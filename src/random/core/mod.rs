//! core — parameter storage, EM configuration, validation, and linear algebra
//! shared by the random-variable models.
//!
//! Purpose
//! -------
//! Collect the building blocks the Student's t model is assembled from:
//! a validated parameter store, EM options, input checks, and the
//! `ndarray`/`nalgebra` bridge used for Cholesky-based work.
//!
//! Key behaviors
//! -------------
//! - [`params`]: [`StudentTParams`] and the [`ParamValue`] kinds accepted by
//!   its setters.
//! - [`options`]: [`EMOptions`], [`Tolerances`], and [`MeanUpdate`].
//! - [`validation`]: sample and option checks returning [`DistError`]
//!   variants.
//! - [`linalg`]: Cholesky validity checks, SPD inverse and log-determinant,
//!   covariance, and batched quadratic forms.
//!
//! Conventions
//! -----------
//! - No I/O. Only the parameter store logs (at `debug`), when a change of
//!   dimension drops the precision matrix.
//!
//! [`DistError`]: crate::random::errors::DistError

pub mod linalg;
pub mod options;
pub mod params;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::options::{
    DEFAULT_ATOL, DEFAULT_INIT_DOF, DEFAULT_LEARNING_RATE, DEFAULT_RTOL, EMOptions, MeanUpdate,
    Tolerances,
};
pub use self::params::{ParamValue, StudentTParams};
pub use self::validation::validate_samples;
