//! random — continuous random variables with maximum-likelihood style
//! fitting.
//!
//! Purpose
//! -------
//! Provide the multivariate Student's t distribution as a validated,
//! fittable model: parameters are assigned through checked setters, fitted
//! from samples by expectation–maximization, and queried for densities and
//! moments.
//!
//! Key behaviors
//! -------------
//! - [`core`] holds the parameter store ([`StudentTParams`]), EM options
//!   ([`EMOptions`]), validation helpers, and linear-algebra primitives.
//! - [`models`] exposes [`StudentT`] and the EM update equations.
//! - [`traits`] defines [`RandomVariable`], the `fit`/`pdf` interface.
//! - [`errors`] defines [`DistError`] and the [`DistResult`] alias shared by
//!   every layer.
//!
//! Invariants & assumptions
//! ------------------------
//! - A set precision matrix always matches the dimension of the location and
//!   admits a Cholesky factorization.
//! - Samples are `n×D` with one observation per row and finite entries.
//! - Models are single-owner; `fit` requires `&mut self`.
//!
//! Conventions
//! -----------
//! - Logging goes through the `log` facade: `debug!` per EM iteration and on
//!   dropped precision, `info!` on convergence, `warn!` on early termination.
//!   No logger is installed by this crate.
//!
//! Downstream usage
//! ----------------
//! - Typical flow:
//!   1. `StudentT::default()` or `StudentT::new(loc, precision, dof)`.
//!   2. Optionally `.with_options(EMOptions::new(...)?)`.
//!   3. `fit(samples.view())?`, then `pdf`, `ln_pdf`, `mean`, `variance`.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; integration tests under `tests/`
//!   exercise fitting on simulated data through the public surface.

pub mod core;
pub mod errors;
pub mod models;
pub mod traits;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{EMOptions, MeanUpdate, ParamValue, StudentTParams, Tolerances};
pub use self::errors::{DistError, DistResult};
pub use self::models::{EMOutcome, StudentT};
pub use self::traits::RandomVariable;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_students_t::random::prelude::*;
//
// to import the main distribution surface in a single line.

pub mod prelude {
    pub use super::{
        DistError, DistResult, EMOptions, EMOutcome, MeanUpdate, ParamValue, RandomVariable,
        StudentT, StudentTParams, Tolerances,
    };
}
