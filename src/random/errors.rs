//! Errors for random-variable models (parameter assignment, sample
//! validation, EM options, and fitting failures).
//!
//! This module defines [`DistError`], the single error type returned by the
//! parameter store, the density evaluator, the moment accessors, and the EM
//! fitter. It implements `Display`/`Error` so callers can box it or print it
//! directly.
//!
//! ## Conventions
//! - **Indices are 0-based** (rows are observations, columns are dimensions).
//! - Parameter names in payloads use the public field names: `"loc"`,
//!   `"precision"`, `"dof"`.
//! - Every failure is reported at the point of violation; nothing here is
//!   retried or recovered internally.

/// Crate-wide result alias for distribution operations that may produce
/// [`DistError`].
pub type DistResult<T> = Result<T, DistError>;

/// Unified error type for distribution models.
///
/// Covers parameter assignment, sample validation, EM configuration, and
/// failures raised while the EM loop is running.
#[derive(Debug, Clone, PartialEq)]
pub enum DistError {
    // ---- Parameter assignment ----
    /// Parameter was assigned a value kind it does not accept.
    InvalidParameterType { param: &'static str, reason: &'static str },

    /// Precision matrix shape is inconsistent with the established dimension.
    ShapeMismatch { expected: (usize, usize), actual: (usize, usize) },

    /// Matrix failed the Cholesky factorization (not symmetric positive-definite
    /// or numerically singular).
    NotPositiveDefinite { context: &'static str },

    /// Precision assigned before the location fixed the dimension.
    DimensionUnknown,

    /// A query needed a parameter that has not been set.
    ParametersUnset { param: &'static str },

    /// Mean or variance requested outside its domain of definition.
    UndefinedMoment { moment: &'static str, dof: f64 },

    // ---- Sample validation ----
    /// Sample matrix has no rows or no columns.
    EmptySamples,

    /// Too few rows to estimate an initial covariance.
    InsufficientSamples { n: usize },

    /// A sample entry is NaN/±inf.
    NonFiniteData { row: usize, col: usize, value: f64 },

    /// Sample column count differs from the distribution dimension.
    SampleDimMismatch { expected: usize, actual: usize },

    // ---- EM options ----
    /// Convergence tolerance must be finite and >= 0.
    InvalidTolerance { tol: f64, reason: &'static str },

    /// Degrees-of-freedom learning rate must be finite and > 0.
    InvalidLearningRate { value: f64, reason: &'static str },

    /// Maximum iterations must be at least 1.
    InvalidMaxIter { max_iter: usize, reason: &'static str },

    /// Starting degrees of freedom must be finite and > 0.
    InvalidInitDof { value: f64, reason: &'static str },

    // ---- EM fitting ----
    /// Iteration cap reached before the parameters settled.
    NotConverged { iterations: usize },

    /// Degrees-of-freedom update left the positive reals.
    DegreesOfFreedomDiverged { dof: f64, iteration: usize },
}

impl std::error::Error for DistError {}

impl std::fmt::Display for DistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Parameter assignment ----
            DistError::InvalidParameterType { param, reason } => {
                write!(f, "Invalid value for parameter '{param}': {reason}")
            }
            DistError::ShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "Precision shape mismatch: expected {}x{}, got {}x{}",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            DistError::NotPositiveDefinite { context } => {
                write!(f, "Matrix is not positive-definite (Cholesky failed): {context}")
            }
            DistError::DimensionUnknown => {
                write!(f, "Dimension is unknown; set 'loc' before assigning 'precision'.")
            }
            DistError::ParametersUnset { param } => {
                write!(f, "Parameter '{param}' is unset.")
            }
            DistError::UndefinedMoment { moment, dof } => {
                write!(f, "The {moment} is undefined for dof = {dof}.")
            }
            // ---- Sample validation ----
            DistError::EmptySamples => {
                write!(f, "Sample matrix is empty.")
            }
            DistError::InsufficientSamples { n } => {
                write!(f, "At least 2 samples are required to fit; got {n}.")
            }
            DistError::NonFiniteData { row, col, value } => {
                write!(f, "Sample at row {row}, column {col} is non-finite: {value}")
            }
            DistError::SampleDimMismatch { expected, actual } => {
                write!(f, "Samples must have {expected} columns; got {actual}.")
            }
            // ---- EM options ----
            DistError::InvalidTolerance { tol, reason } => {
                write!(f, "Tolerance must be finite and >= 0; got: {tol}. {reason}")
            }
            DistError::InvalidLearningRate { value, reason } => {
                write!(f, "Learning rate must be finite and > 0; got: {value}. {reason}")
            }
            DistError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "max_iter must be >= 1; got: {max_iter}. {reason}")
            }
            DistError::InvalidInitDof { value, reason } => {
                write!(f, "Initial dof must be finite and > 0; got: {value}. {reason}")
            }
            // ---- EM fitting ----
            DistError::NotConverged { iterations } => {
                write!(f, "EM did not converge within {iterations} iterations.")
            }
            DistError::DegreesOfFreedomDiverged { dof, iteration } => {
                write!(f, "Degrees of freedom diverged to {dof} at EM iteration {iteration}.")
            }
        }
    }
}
