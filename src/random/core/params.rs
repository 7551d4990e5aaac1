//! Parameter store for the multivariate Student's t distribution.
//!
//! Purpose
//! -------
//! Hold the location vector, precision matrix, and degrees of freedom, and
//! enforce their invariants on every assignment. All writes go through
//! explicit setters; there is no way to place an unchecked value in the store.
//!
//! Key behaviors
//! -------------
//! - [`ParamValue`] carries the kind of value being assigned (unset, scalar,
//!   vector, matrix) so each setter can accept exactly the kinds it supports
//!   and reject the others with [`DistError::InvalidParameterType`].
//! - `set_loc` fixes the dimension `D`. A scalar becomes a length-1 vector.
//! - `set_precision` expands a scalar `s` into `s · I_D`, checks matrix shape
//!   against `D`, and requires a successful Cholesky factorization.
//! - `set_dof` accepts a finite scalar or unset.
//! - Rejected assignments leave the store untouched.
//!
//! Invariants & assumptions
//! ------------------------
//! - If `precision` is set then `loc` is set and `precision` is `D×D` and
//!   Cholesky-factorizable.
//! - All stored entries are finite.
//! - Re-setting `loc` to a different length, or unsetting it, drops the
//!   precision matrix because its shape no longer matches.
//!
//! Conventions
//! -----------
//! - Parameter names used in errors: `"loc"`, `"precision"`, `"dof"`.
//! - Snapshots ([`StudentTParams::flatten`]) list `loc`, then `precision` in
//!   row-major order, then `dof`.
use crate::random::{
    core::linalg::check_positive_definite,
    errors::{DistError, DistResult},
};
use ndarray::{Array1, Array2};

/// A value offered to one of the parameter setters.
///
/// Conversions exist from `f64`, `i32`, `Vec<f64>`, `Array1<f64>`,
/// `Array2<f64>`, and `Option<T>` for any convertible `T` (`None` maps to
/// [`ParamValue::Unset`]).
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Clear the parameter.
    Unset,
    /// A real scalar.
    Scalar(f64),
    /// A real vector.
    Vector(Array1<f64>),
    /// A real matrix.
    Matrix(Array2<f64>),
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Scalar(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Scalar(f64::from(value))
    }
}

impl From<Vec<f64>> for ParamValue {
    fn from(value: Vec<f64>) -> Self {
        ParamValue::Vector(Array1::from(value))
    }
}

impl From<Array1<f64>> for ParamValue {
    fn from(value: Array1<f64>) -> Self {
        ParamValue::Vector(value)
    }
}

impl From<Array2<f64>> for ParamValue {
    fn from(value: Array2<f64>) -> Self {
        ParamValue::Matrix(value)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Unset, Into::into)
    }
}

/// Location, precision, and degrees of freedom with validated setters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StudentTParams {
    loc: Option<Array1<f64>>,
    precision: Option<Array2<f64>>,
    dof: Option<f64>,
}

impl StudentTParams {
    /// Build a store by assigning `loc`, then `precision`, then `dof`.
    ///
    /// # Errors
    /// Returns the first error raised by [`set_loc`](Self::set_loc),
    /// [`set_precision`](Self::set_precision), or [`set_dof`](Self::set_dof).
    pub fn new(
        loc: impl Into<ParamValue>, precision: impl Into<ParamValue>, dof: impl Into<ParamValue>,
    ) -> DistResult<Self> {
        let mut params = StudentTParams::default();
        params.set_loc(loc)?;
        params.set_precision(precision)?;
        params.set_dof(dof)?;
        Ok(params)
    }

    /// Location vector, if set.
    pub fn loc(&self) -> Option<&Array1<f64>> {
        self.loc.as_ref()
    }

    /// Precision matrix, if set.
    pub fn precision(&self) -> Option<&Array2<f64>> {
        self.precision.as_ref()
    }

    /// Degrees of freedom, if set.
    pub fn dof(&self) -> Option<f64> {
        self.dof
    }

    /// Dimension `D`, known once `loc` is set.
    pub fn dim(&self) -> Option<usize> {
        self.loc.as_ref().map(Array1::len)
    }

    /// Assign the location vector.
    ///
    /// Parameters
    /// ----------
    /// - `value`: `impl Into<ParamValue>`
    ///   - `Scalar(v)`: stored as `[v]`, fixing `D = 1`.
    ///   - `Vector(v)`: stored as-is, fixing `D = v.len()` (must be non-empty).
    ///   - `Unset`: clears `loc` and the precision matrix.
    ///
    /// Errors
    /// ------
    /// - `DistError::InvalidParameterType`
    ///   For a matrix, an empty vector, or non-finite entries.
    ///
    /// Notes
    /// -----
    /// - If the new length differs from the current one the precision matrix
    ///   is cleared, since its shape no longer matches `D`.
    pub fn set_loc(&mut self, value: impl Into<ParamValue>) -> DistResult<()> {
        let loc = match value.into() {
            ParamValue::Unset => None,
            ParamValue::Scalar(v) => Some(Array1::from_elem(1, v)),
            ParamValue::Vector(v) if v.is_empty() => {
                return Err(DistError::InvalidParameterType {
                    param: "loc",
                    reason: "vector must be non-empty",
                });
            }
            ParamValue::Vector(v) => Some(v),
            ParamValue::Matrix(_) => {
                return Err(DistError::InvalidParameterType {
                    param: "loc",
                    reason: "expected a scalar, a vector, or unset; got a matrix",
                });
            }
        };
        if loc.as_ref().is_some_and(|v| v.iter().any(|x| !x.is_finite())) {
            return Err(DistError::InvalidParameterType {
                param: "loc",
                reason: "entries must be finite",
            });
        }
        let new_dim = loc.as_ref().map(Array1::len);
        if self.precision.is_some() && new_dim != self.dim() {
            log::debug!(
                "loc dimension changed from {:?} to {new_dim:?}; clearing precision",
                self.dim()
            );
            self.precision = None;
        }
        self.loc = loc;
        Ok(())
    }

    /// Assign the precision matrix.
    ///
    /// Parameters
    /// ----------
    /// - `value`: `impl Into<ParamValue>`
    ///   - `Scalar(s)`: stored as `s · I_D`.
    ///   - `Matrix(m)`: stored as-is after shape and Cholesky checks.
    ///   - `Unset`: clears the precision matrix.
    ///
    /// Errors
    /// ------
    /// - `DistError::DimensionUnknown` if `loc` is unset (scalar or matrix).
    /// - `DistError::ShapeMismatch` if `m` is not `D×D`.
    /// - `DistError::InvalidParameterType` for a vector or non-finite entries.
    /// - `DistError::NotPositiveDefinite` if the Cholesky factorization fails.
    ///   This also applies to `s · I_D` with `s <= 0`.
    pub fn set_precision(&mut self, value: impl Into<ParamValue>) -> DistResult<()> {
        let matrix: Array2<f64> = match value.into() {
            ParamValue::Unset => {
                self.precision = None;
                return Ok(());
            }
            ParamValue::Vector(_) => {
                return Err(DistError::InvalidParameterType {
                    param: "precision",
                    reason: "expected a scalar, a square matrix, or unset; got a vector",
                });
            }
            ParamValue::Scalar(s) => {
                let dim = self.dim().ok_or(DistError::DimensionUnknown)?;
                Array2::eye(dim) * s
            }
            ParamValue::Matrix(m) => {
                let dim = self.dim().ok_or(DistError::DimensionUnknown)?;
                if m.dim() != (dim, dim) {
                    return Err(DistError::ShapeMismatch { expected: (dim, dim), actual: m.dim() });
                }
                m
            }
        };
        if matrix.iter().any(|x| !x.is_finite()) {
            return Err(DistError::InvalidParameterType {
                param: "precision",
                reason: "entries must be finite",
            });
        }
        check_positive_definite(matrix.view(), "precision")?;
        self.precision = Some(matrix);
        Ok(())
    }

    /// Assign the degrees of freedom.
    ///
    /// # Errors
    /// Returns [`DistError::InvalidParameterType`] for a vector, a matrix, or a
    /// non-finite scalar.
    pub fn set_dof(&mut self, value: impl Into<ParamValue>) -> DistResult<()> {
        match value.into() {
            ParamValue::Unset => self.dof = None,
            ParamValue::Scalar(v) if v.is_finite() => self.dof = Some(v),
            ParamValue::Scalar(_) => {
                return Err(DistError::InvalidParameterType {
                    param: "dof",
                    reason: "scalar must be finite",
                });
            }
            ParamValue::Vector(_) | ParamValue::Matrix(_) => {
                return Err(DistError::InvalidParameterType {
                    param: "dof",
                    reason: "expected a scalar or unset",
                });
            }
        }
        Ok(())
    }

    /// Location vector or [`DistError::ParametersUnset`].
    pub fn require_loc(&self) -> DistResult<&Array1<f64>> {
        self.loc.as_ref().ok_or(DistError::ParametersUnset { param: "loc" })
    }

    /// Precision matrix or [`DistError::ParametersUnset`].
    pub fn require_precision(&self) -> DistResult<&Array2<f64>> {
        self.precision.as_ref().ok_or(DistError::ParametersUnset { param: "precision" })
    }

    /// Degrees of freedom or [`DistError::ParametersUnset`].
    pub fn require_dof(&self) -> DistResult<f64> {
        self.dof.ok_or(DistError::ParametersUnset { param: "dof" })
    }

    /// Flat snapshot `[loc..., precision (row-major)..., dof]` of the set fields.
    pub fn flatten(&self) -> Vec<f64> {
        let mut flat = Vec::new();
        if let Some(loc) = &self.loc {
            flat.extend(loc.iter().copied());
        }
        if let Some(precision) = &self.precision {
            flat.extend(precision.iter().copied());
        }
        if let Some(dof) = self.dof {
            flat.push(dof);
        }
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Each setter's accepted and rejected value kinds.
    // - Scalar promotion for loc and scaled identity for precision.
    // - Atomicity of rejected assignments.
    // - Clearing of the precision matrix when D changes.
    //
    // Density, moments and fitting are covered in `models::student_t`.
    // -------------------------------------------------------------------------

    #[test]
    fn set_loc_promotes_scalar_to_length_one_vector() {
        let mut params = StudentTParams::default();

        params.set_loc(2.5).unwrap();

        assert_eq!(params.loc(), Some(&array![2.5]));
        assert_eq!(params.dim(), Some(1));
    }

    #[test]
    fn set_loc_accepts_vectors_and_integers() {
        let mut params = StudentTParams::default();

        params.set_loc(vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(params.dim(), Some(3));

        params.set_loc(4_i32).unwrap();
        assert_eq!(params.loc(), Some(&array![4.0]));
    }

    #[test]
    fn set_loc_rejects_matrix_and_empty_vector() {
        let mut params = StudentTParams::default();

        let matrix = params.set_loc(array![[1.0]]);
        let empty = params.set_loc(Array1::<f64>::zeros(0));

        assert!(matches!(matrix, Err(DistError::InvalidParameterType { param: "loc", .. })));
        assert!(matches!(empty, Err(DistError::InvalidParameterType { param: "loc", .. })));
        assert_eq!(params.loc(), None);
    }

    #[test]
    // Purpose
    // -------
    // A scalar precision expands to a scaled identity of the current dimension.
    //
    // Given
    // -----
    // - loc of length 3, precision scalar 2.0.
    //
    // Expect
    // ------
    // - precision == 2 · I_3.
    fn set_precision_scalar_yields_scaled_identity() {
        let mut params = StudentTParams::default();
        params.set_loc(array![0.0, 0.0, 0.0]).unwrap();

        params.set_precision(2.0).unwrap();

        assert_eq!(params.precision(), Some(&(Array2::<f64>::eye(3) * 2.0)));
    }

    #[test]
    fn set_precision_before_loc_fails_with_dimension_unknown() {
        let mut params = StudentTParams::default();

        assert_eq!(params.set_precision(1.0), Err(DistError::DimensionUnknown));
        assert_eq!(params.set_precision(array![[1.0]]), Err(DistError::DimensionUnknown));
    }

    #[test]
    fn set_precision_rejects_wrong_shape() {
        let mut params = StudentTParams::default();
        params.set_loc(array![0.0, 0.0]).unwrap();

        let res = params.set_precision(array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);

        assert_eq!(res, Err(DistError::ShapeMismatch { expected: (2, 2), actual: (2, 3) }));
    }

    #[test]
    fn set_precision_rejects_vector_kind() {
        let mut params = StudentTParams::default();
        params.set_loc(array![0.0, 0.0]).unwrap();

        let res = params.set_precision(array![1.0, 1.0]);

        assert!(matches!(res, Err(DistError::InvalidParameterType { param: "precision", .. })));
    }

    #[test]
    // Purpose
    // -------
    // A rejected non-PD assignment must not touch the previously stored matrix.
    //
    // Given
    // -----
    // - A valid diagonal precision already stored.
    // - An indefinite candidate [[1, 2], [2, 1]] and a non-positive scalar.
    //
    // Expect
    // ------
    // - Both assignments fail with `NotPositiveDefinite`.
    // - The stored precision is unchanged.
    fn set_precision_non_pd_is_rejected_atomically() {
        let mut params = StudentTParams::default();
        params.set_loc(array![0.0, 0.0]).unwrap();
        params.set_precision(array![[2.0, 0.0], [0.0, 3.0]]).unwrap();
        let before = params.clone();

        let indefinite = params.set_precision(array![[1.0, 2.0], [2.0, 1.0]]);
        let negative_scalar = params.set_precision(-1.0);

        assert_eq!(indefinite, Err(DistError::NotPositiveDefinite { context: "precision" }));
        assert_eq!(negative_scalar, Err(DistError::NotPositiveDefinite { context: "precision" }));
        assert_eq!(params, before);
    }

    #[test]
    fn set_loc_with_new_dimension_clears_precision() {
        let mut params = StudentTParams::new(array![0.0, 0.0], 1.0, 3.0).unwrap();

        params.set_loc(array![1.0, 1.0]).unwrap();
        assert!(params.precision().is_some());

        params.set_loc(array![1.0, 1.0, 1.0]).unwrap();
        assert!(params.precision().is_none());

        params.set_precision(1.0).unwrap();
        params.set_loc(ParamValue::Unset).unwrap();
        assert!(params.precision().is_none());
        assert_eq!(params.dim(), None);
    }

    #[test]
    fn set_dof_accepts_scalar_or_unset_only() {
        let mut params = StudentTParams::default();

        params.set_dof(4.0).unwrap();
        assert_eq!(params.dof(), Some(4.0));

        assert!(matches!(
            params.set_dof(array![1.0]),
            Err(DistError::InvalidParameterType { param: "dof", .. })
        ));
        assert!(matches!(
            params.set_dof(f64::NAN),
            Err(DistError::InvalidParameterType { param: "dof", .. })
        ));
        assert_eq!(params.dof(), Some(4.0));

        params.set_dof(None::<f64>).unwrap();
        assert_eq!(params.dof(), None);
    }

    #[test]
    fn require_accessors_report_which_parameter_is_unset() {
        let params = StudentTParams::default();

        assert_eq!(params.require_loc(), Err(DistError::ParametersUnset { param: "loc" }));
        assert_eq!(
            params.require_precision(),
            Err(DistError::ParametersUnset { param: "precision" })
        );
        assert_eq!(params.require_dof(), Err(DistError::ParametersUnset { param: "dof" }));
    }

    #[test]
    fn flatten_orders_loc_precision_row_major_then_dof() {
        let params =
            StudentTParams::new(array![1.0, 2.0], array![[3.0, 0.5], [0.5, 4.0]], 5.0).unwrap();

        assert_eq!(params.flatten(), vec![1.0, 2.0, 3.0, 0.5, 0.5, 4.0, 5.0]);
    }
}
