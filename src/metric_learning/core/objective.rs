//! NCA objective — softmax neighbor probabilities, loss and gradient.
//!
//! Purpose
//! -------
//! Evaluate the Neighborhood Components Analysis objective and its analytic
//! gradient for a flattened transform `a`. This is the function the L-BFGS
//! driver calls repeatedly; it is pure and holds no state between calls.
//!
//! Key behaviors
//! -------------
//! - [`evaluate`] returns `sign · loss` and `sign · ∂loss/∂a`, where `loss`
//!   is the expected number of points whose stochastic nearest neighbor
//!   shares their label.
//! - [`pairwise_sq_distances`], [`neighbor_probabilities`] and
//!   [`class_probabilities`] expose the intermediate quantities for reuse and
//!   diagnostics.
//!
//! Invariants & assumptions
//! ------------------------
//! - `a` is row-major `L` (k×d) with `k = len(a) / d`; `len(a)` must be a
//!   positive multiple of `d`.
//! - `D[i][i] = +∞`, so `P[i][i] = 0` and every row of `P` sums to 1 whenever
//!   `n ≥ 2`.
//! - `loss ∈ [0, n]`; the gradient has the same length as `a`.
//! - Identical points and single-class data never produce NaN.
//!
//! Conventions
//! -----------
//! - With `Y = X·Lᵗ`, `P' = P ⊙ M`, `p_i = Σ_j P'[i][j]`:
//!   `W = P' − P ⊙ p`, `W_sym = W + Wᵗ` with diagonal `−colSum(W)`, and
//!   `∇ = 2 · Yᵗ · W_sym · X`.
//! - The driver passes `sign = -1` so a minimizer maximizes the loss.
//!
//! Testing notes
//! -------------
//! - Unit tests check row-stochasticity, loss bounds, agreement of the
//!   gradient with central finite differences on a random n=6, d=3, k=2
//!   instance, idempotence, and the degenerate inputs above.
use crate::{
    metric_learning::{
        core::data::SameClassMask,
        errors::{NcaError, NcaResult},
    },
    optimization::numerical_stability::softmax_in_place,
};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis, Zip};

/// Signed objective value and gradient at one point.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// `sign · loss`.
    pub loss: f64,
    /// `sign · ∂loss/∂a`, same length as `a`.
    pub gradient: Array1<f64>,
}

/// Reshape a flattened row-major transform into `L` (k×d).
///
/// Errors
/// ------
/// - `NcaError::TransformLengthMismatch` when `a` is empty or its length is
///   not a multiple of `n_features`.
pub fn reshape_transform(a: ArrayView1<f64>, n_features: usize) -> NcaResult<Array2<f64>> {
    let actual = a.len();
    if n_features == 0 || actual == 0 || actual % n_features != 0 {
        return Err(NcaError::TransformLengthMismatch { n_features, actual });
    }
    Array2::from_shape_vec((actual / n_features, n_features), a.to_vec())
        .map_err(|_| NcaError::TransformLengthMismatch { n_features, actual })
}

/// Squared Euclidean distances between the rows of `y`, with `+∞` on the
/// diagonal.
pub fn pairwise_sq_distances(y: ArrayView2<f64>) -> Array2<f64> {
    let n = y.nrows();
    let mut dist = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        dist[[i, i]] = f64::INFINITY;
        for j in (i + 1)..n {
            let d2: f64 = Zip::from(y.row(i)).and(y.row(j)).fold(0.0, |acc, &a, &b| {
                let diff = a - b;
                acc + diff * diff
            });
            dist[[i, j]] = d2;
            dist[[j, i]] = d2;
        }
    }
    dist
}

/// Row-wise softmax of `−D` for the rows of `y`.
///
/// Each row sums to 1 with a zero diagonal. With a single row there is no
/// neighbor and the row is all zeros.
pub fn neighbor_probabilities(y: ArrayView2<f64>) -> Array2<f64> {
    let mut p = pairwise_sq_distances(y);
    p.mapv_inplace(|d| -d);
    for row in p.axis_iter_mut(Axis(0)) {
        softmax_in_place(row);
    }
    p
}

/// Per-sample probability `p_i = Σ_j P[i][j]·M[i][j]` of selecting a
/// same-class neighbor.
///
/// Errors
/// ------
/// - `NcaError::MaskShapeMismatch` when `mask` does not match `p`.
pub fn class_probabilities(p: ArrayView2<f64>, mask: &SameClassMask) -> NcaResult<Array1<f64>> {
    mask.check_dim(p.nrows())?;
    Ok((&p * &mask.as_weights()).sum_axis(Axis(1)))
}

/// Evaluate `(sign · loss, sign · gradient)` at the flattened transform `a`.
///
/// Parameters
/// ----------
/// - `a`: `ArrayView1<f64>`
///   Row-major `L` of length k·d.
/// - `x`: `ArrayView2<f64>`
///   Design matrix, n×d.
/// - `mask`: `&SameClassMask`
///   n×n same-class indicator.
/// - `sign`: `f64`
///   Multiplier applied to both outputs (`+1` for the loss itself, `-1` for
///   minimization).
///
/// Errors
/// ------
/// - `NcaError::MaskShapeMismatch` when `mask` is not n×n.
/// - `NcaError::TransformLengthMismatch` when `a` cannot be reshaped to k×d.
pub fn evaluate(
    a: ArrayView1<f64>, x: ArrayView2<f64>, mask: &SameClassMask, sign: f64,
) -> NcaResult<Evaluation> {
    mask.check_dim(x.nrows())?;
    let l = reshape_transform(a, x.ncols())?;

    let y = x.dot(&l.t());
    let p = neighbor_probabilities(y.view());
    let masked = &p * &mask.as_weights();
    let p_class = masked.sum_axis(Axis(1));
    let loss = p_class.sum();

    let w = &masked - &(&p * &p_class.view().insert_axis(Axis(1)));
    let col_sums = w.sum_axis(Axis(0));
    let mut w_sym = &w + &w.t();
    w_sym.diag_mut().assign(&col_sums.mapv(|v| -v));

    let grad = y.t().dot(&w_sym).dot(&x);
    let gradient = grad.iter().map(|&g| 2.0 * sign * g).collect::<Array1<f64>>();

    Ok(Evaluation { loss: sign * loss, gradient })
}
