//! Initial transform policies for NCA.
//!
//! Purpose
//! -------
//! Produce the starting transform `L₀` (k×d) handed to the optimizer.
//! The default policy rescales every feature by the inverse of its observed
//! range so all features start on a comparable footing; a fixed warm start
//! is also supported.
//!
//! Key behaviors
//! -------------
//! - [`scaling_init`] builds a k×d matrix that is zero except for
//!   `L₀[j][j] = 1 / max(range_j, ε)` for `j < min(k, d)`.
//! - [`Init`] selects between the scaling rule and a user-supplied matrix,
//!   validating the latter against the expected shape.
//!
//! Invariants & assumptions
//! ------------------------
//! - `range_j = max(X[:, j]) − min(X[:, j])` over finite data.
//! - Ranges are floored at [`SCALE_FLOOR`] (`f64::EPSILON`), so constant
//!   features give a large but finite scale `1 / ε` instead of an error.
//! - Works for `k < d`, `k == d` and `k > d`; extra rows/columns stay zero.
use crate::{
    metric_learning::errors::{NcaError, NcaResult},
    optimization::numerical_stability::SCALE_FLOOR,
};
use ndarray::{Array2, ArrayView2, Axis};

/// Initialization policy for the NCA transform.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Init {
    /// Diagonal inverse-range scaling (see [`scaling_init`]).
    #[default]
    Scaling,
    /// Explicit k×d starting matrix.
    Fixed(Array2<f64>),
}

impl Init {
    /// Resolve the policy into a concrete k×d starting transform.
    ///
    /// Errors
    /// ------
    /// - `NcaError::InvalidInitShape` when a fixed matrix is not k×d.
    /// - `NcaError::InvalidInitValue` when a fixed matrix has a non-finite
    ///   entry.
    pub fn initial_transform(&self, x: ArrayView2<f64>, k: usize) -> NcaResult<Array2<f64>> {
        match self {
            Init::Scaling => Ok(scaling_init(x, k)),
            Init::Fixed(l0) => {
                let expected = (k, x.ncols());
                if l0.dim() != expected {
                    return Err(NcaError::InvalidInitShape { expected, actual: l0.dim() });
                }
                if let Some(((row, col), &value)) = l0.indexed_iter().find(|(_, v)| !v.is_finite()) {
                    return Err(NcaError::InvalidInitValue { row, col, value });
                }
                Ok(l0.clone())
            }
        }
    }
}

/// Inverse-range diagonal scaling of `x` into a k×d matrix.
pub fn scaling_init(x: ArrayView2<f64>, k: usize) -> Array2<f64> {
    let d = x.ncols();
    let mut l0 = Array2::<f64>::zeros((k, d));
    for (j, column) in x.axis_iter(Axis(1)).enumerate().take(k.min(d)) {
        let (lo, hi) = column
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let range = (hi - lo).max(SCALE_FLOOR);
        l0[[j, j]] = 1.0 / range;
    }
    l0
}
