//! rust_students_t — multivariate Student's t distribution with EM fitting.
//!
//! Purpose
//! -------
//! Serve as the crate root. All functionality lives in [`random`]: a
//! multivariate Student's t model with validated parameters, a log-space
//! density, mean/covariance accessors, and expectation–maximization
//! estimation of location, precision, and degrees of freedom.
//!
//! Key behaviors
//! -------------
//! - Re-export [`random`] as the public surface; [`random::prelude`] imports
//!   the everyday types in one line.
//!
//! Invariants & assumptions
//! ------------------------
//! - Numerical work uses `ndarray` containers for data and parameters and
//!   `nalgebra` for Cholesky factorizations.
//! - Errors are returned as [`random::DistError`]; the library never panics
//!   on invalid user input.
//!
//! Testing notes
//! -------------
//! - Unit tests sit in `#[cfg(test)]` modules beside the code; end-to-end
//!   fitting on simulated draws lives in `tests/`.

pub mod random;
