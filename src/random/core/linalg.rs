//! linalg — dense linear-algebra helpers bridging `ndarray` and `nalgebra`.
//!
//! Purpose
//! -------
//! Provide the small set of matrix primitives the Student's t model consumes:
//! a Cholesky validity check, a Cholesky-based inverse, a log-determinant,
//! sample/population covariance, and batched quadratic forms. Parameters are
//! stored as `ndarray` containers; factorizations run on `nalgebra::DMatrix`.
//!
//! Key behaviors
//! -------------
//! - Copy `ndarray` matrices into `DMatrix` ([`to_dmatrix`]) and back
//!   ([`to_array2`]) without changing layout semantics.
//! - Reject matrices whose Cholesky factor is missing, non-finite, or has a
//!   non-positive diagonal with [`DistError::NotPositiveDefinite`].
//! - Compute covariance over rows (observations) with a caller-chosen `ddof`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Only the lower triangle is read by the Cholesky factorization; callers
//!   pass symmetric matrices.
//! - Square-ness is the caller's responsibility (shape checks live in the
//!   parameter store).
//!
//! Conventions
//! -----------
//! - Rows are observations, columns are dimensions.
//! - All routines are pure: no logging, no global state.
use crate::random::errors::{DistError, DistResult};
use nalgebra::{Cholesky, DMatrix, Dyn};
use ndarray::{Array1, Array2, ArrayView2, Axis};

/// Copy an `ndarray` matrix into a freshly allocated `DMatrix`.
pub fn to_dmatrix(a: ArrayView2<f64>) -> DMatrix<f64> {
    let (nrows, ncols) = a.dim();
    DMatrix::from_fn(nrows, ncols, |i, j| a[[i, j]])
}

/// Copy a `DMatrix` back into an `ndarray` matrix.
pub fn to_array2(m: &DMatrix<f64>) -> Array2<f64> {
    Array2::from_shape_fn((m.nrows(), m.ncols()), |(i, j)| m[(i, j)])
}

/// cholesky — factorize a symmetric positive-definite matrix.
///
/// Parameters
/// ----------
/// - `a`: `ArrayView2<f64>`
///   Square matrix; only its lower triangle is consulted.
/// - `context`: `&'static str`
///   Short label stored in the error payload (e.g. `"precision"`).
///
/// Returns
/// -------
/// `DistResult<Cholesky<f64, Dyn>>`
///   The factorization `A = L Lᵀ` when every diagonal entry of `L` is finite
///   and strictly positive.
///
/// Errors
/// ------
/// - `DistError::NotPositiveDefinite`
///   Returned when `nalgebra` rejects the matrix, or when the factor has a
///   zero/non-finite pivot (exactly singular or NaN input). `nalgebra`
///   accepts zero pivots, so the diagonal is re-checked here.
pub fn cholesky(a: ArrayView2<f64>, context: &'static str) -> DistResult<Cholesky<f64, Dyn>> {
    let chol = Cholesky::new(to_dmatrix(a)).ok_or(DistError::NotPositiveDefinite { context })?;
    let valid_pivots = chol.l_dirty().diagonal().iter().all(|&v| v.is_finite() && v > 0.0);
    if !valid_pivots {
        return Err(DistError::NotPositiveDefinite { context });
    }
    Ok(chol)
}

/// Fail with [`DistError::NotPositiveDefinite`] unless `a` is Cholesky-factorizable.
pub fn check_positive_definite(a: ArrayView2<f64>, context: &'static str) -> DistResult<()> {
    cholesky(a, context).map(|_| ())
}

/// Inverse of a symmetric positive-definite matrix via its Cholesky factor.
///
/// The result is symmetric by construction, so it can be stored as a
/// precision matrix without re-symmetrizing. An inverse that overflows to
/// ±inf is reported as [`DistError::NotPositiveDefinite`].
pub fn inverse_spd(a: ArrayView2<f64>, context: &'static str) -> DistResult<Array2<f64>> {
    let inv = cholesky(a, context)?.inverse();
    if inv.iter().any(|v| !v.is_finite()) {
        return Err(DistError::NotPositiveDefinite { context });
    }
    Ok(to_array2(&inv))
}

/// `ln det(A)` for symmetric positive-definite `A`, computed as `2 Σ ln L_ii`.
pub fn ln_det_spd(a: ArrayView2<f64>, context: &'static str) -> DistResult<f64> {
    let chol = cholesky(a, context)?;
    Ok(2.0 * chol.l_dirty().diagonal().iter().map(|v| v.ln()).sum::<f64>())
}

/// covariance — covariance of the columns of `x` over its rows.
///
/// Parameters
/// ----------
/// - `x`: `ArrayView2<f64>`
///   `n×d` data matrix with observations in rows.
/// - `ddof`: `usize`
///   Delta degrees of freedom; the divisor is `n - ddof` (`1` for the sample
///   covariance, `0` for the population covariance).
///
/// Returns
/// -------
/// `Array2<f64>`
///   Symmetric `d×d` covariance, centered on the column means of `x`.
///
/// Panics
/// ------
/// - Never panics for `n > ddof`; callers validate the sample count first.
pub fn covariance(x: ArrayView2<f64>, ddof: usize) -> Array2<f64> {
    let n = x.nrows();
    let centered = match x.mean_axis(Axis(0)) {
        Some(col_means) => &x - &col_means,
        None => return Array2::zeros((x.ncols(), x.ncols())),
    };
    let divisor = (n - ddof) as f64;
    centered.t().dot(&centered) / divisor
}

/// Row-wise quadratic forms `q_i = d_iᵀ · P · d_i` for an `n×d` residual matrix.
pub fn quadratic_forms(d: ArrayView2<f64>, p: ArrayView2<f64>) -> Array1<f64> {
    (&d.dot(&p) * &d).sum_axis(Axis(1))
}
