//! Validation helpers — reusable checks for samples and EM configuration.
//!
//! Purpose
//! -------
//! Centralize the small checks used by the Student's t model so that
//! constructors, `fit`, and `pdf` fail fast with structured errors instead of
//! producing NaNs deep inside the EM loop.
//!
//! Key behaviors
//! -------------
//! - Validate sample matrices: non-empty, finite, and (optionally) of the
//!   expected column count.
//! - Validate EM knobs: tolerances, learning rate, iteration cap, and starting
//!   degrees of freedom.
//!
//! Conventions
//! -----------
//! - Functions return the validated value on success so call sites can bind
//!   it directly (`let rtol = validate_tolerance(rtol)?;`).
//! - This module performs no I/O and no logging.
use crate::random::errors::{DistError, DistResult};
use ndarray::ArrayView2;

/// Validate a sample matrix and return its `(n, d)` shape.
///
/// Parameters
/// ----------
/// - `samples`: `ArrayView2<f64>`
///   `n×d` matrix, one observation per row.
/// - `expected_dim`: `Option<usize>`
///   When `Some(d)`, the number of columns must equal `d`.
///
/// Errors
/// ------
/// - `DistError::EmptySamples` if `n == 0` or `d == 0`.
/// - `DistError::SampleDimMismatch` if the column count is wrong.
/// - `DistError::NonFiniteData` for the first NaN/±inf entry in row-major
///   order.
pub fn validate_samples(
    samples: ArrayView2<f64>, expected_dim: Option<usize>,
) -> DistResult<(usize, usize)> {
    let (n, d) = samples.dim();
    if n == 0 || d == 0 {
        return Err(DistError::EmptySamples);
    }
    if let Some(expected) = expected_dim {
        if d != expected {
            return Err(DistError::SampleDimMismatch { expected, actual: d });
        }
    }
    for ((row, col), &value) in samples.indexed_iter() {
        if !value.is_finite() {
            return Err(DistError::NonFiniteData { row, col, value });
        }
    }
    Ok((n, d))
}

/// Validate a convergence tolerance (`rtol` or `atol`): finite and `>= 0`.
pub fn validate_tolerance(tol: f64) -> DistResult<f64> {
    if !tol.is_finite() {
        return Err(DistError::InvalidTolerance { tol, reason: "Tolerance must be finite." });
    }
    if tol < 0.0 {
        return Err(DistError::InvalidTolerance { tol, reason: "Tolerance must be non-negative." });
    }
    Ok(tol)
}

/// Validate the degrees-of-freedom step size: finite and strictly positive.
pub fn validate_learning_rate(value: f64) -> DistResult<f64> {
    if !value.is_finite() {
        return Err(DistError::InvalidLearningRate {
            value,
            reason: "Learning rate must be finite.",
        });
    }
    if value <= 0.0 {
        return Err(DistError::InvalidLearningRate {
            value,
            reason: "Learning rate must be strictly positive.",
        });
    }
    Ok(value)
}

/// Validate an optional iteration cap; `Some(0)` is rejected.
pub fn validate_max_iter(max_iter: Option<usize>) -> DistResult<Option<usize>> {
    match max_iter {
        Some(0) => Err(DistError::InvalidMaxIter {
            max_iter: 0,
            reason: "Use None for an unbounded loop.",
        }),
        other => Ok(other),
    }
}

/// Validate the starting degrees of freedom: finite and strictly positive.
pub fn validate_init_dof(value: f64) -> DistResult<f64> {
    if !value.is_finite() {
        return Err(DistError::InvalidInitDof { value, reason: "Initial dof must be finite." });
    }
    if value <= 0.0 {
        return Err(DistError::InvalidInitDof {
            value,
            reason: "Initial dof must be strictly positive.",
        });
    }
    Ok(value)
}
