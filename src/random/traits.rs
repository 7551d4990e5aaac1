//! Common interface for fitted random variables.
//!
//! - [`RandomVariable`]: estimate parameters from samples and evaluate the
//!   density at new points.
//!
//! Convention: samples are `n×D` matrices with one observation per row, and
//! both methods report failures through [`DistResult`].
use crate::random::errors::DistResult;
use ndarray::{Array1, ArrayView2};

/// Interface shared by fittable continuous distributions.
///
/// Required:
/// - `fit(samples)`: estimate parameters in place from `samples`.
///   - Errors: sample validation or estimation failures.
/// - `pdf(samples)`: density at every row of `samples`.
///   - Errors: unset parameters or samples of the wrong dimension.
pub trait RandomVariable {
    fn fit(&mut self, samples: ArrayView2<f64>) -> DistResult<()>;
    fn pdf(&self, samples: ArrayView2<f64>) -> DistResult<Array1<f64>>;
}
