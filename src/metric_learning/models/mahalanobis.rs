//! Shared helpers for models that learn a linear map `L` and therefore a
//! Mahalanobis metric `M = LᵗL`.
//!
//! Implementors only supply [`MahalanobisTransform::transformer`]; the
//! projection, metric matrix and pairwise distances come from default
//! methods.
use crate::metric_learning::{
    core::data::validate_finite,
    errors::{NcaError, NcaResult},
};
use ndarray::{Array1, Array2, ArrayView2, Axis};

pub trait MahalanobisTransform {
    /// Learned k×d transform, or `ModelNotFitted`.
    fn transformer(&self) -> NcaResult<&Array2<f64>>;

    /// Project rows of `x` (n×d) into the learned space: `X·Lᵗ` (n×k).
    ///
    /// Errors
    /// ------
    /// - `NcaError::ModelNotFitted` before fitting.
    /// - `NcaError::FeatureMismatch` when `x` does not have d columns.
    /// - `NcaError::NonFiniteData` for NaN/±∞ entries.
    fn transform(&self, x: ArrayView2<f64>) -> NcaResult<Array2<f64>> {
        let l = self.transformer()?;
        if x.ncols() != l.ncols() {
            return Err(NcaError::FeatureMismatch { expected: l.ncols(), actual: x.ncols() });
        }
        validate_finite(x)?;
        Ok(x.dot(&l.t()))
    }

    /// Mahalanobis matrix `M = LᵗL` (d×d, symmetric positive semi-definite).
    fn mahalanobis_matrix(&self) -> NcaResult<Array2<f64>> {
        let l = self.transformer()?;
        Ok(l.t().dot(l))
    }

    /// Distances `‖L(aᵢ − bᵢ)‖` between matching rows of `a` and `b`.
    ///
    /// Errors
    /// ------
    /// - `NcaError::PairShapeMismatch` when `a` and `b` differ in shape.
    /// - Same errors as [`MahalanobisTransform::transform`].
    fn pair_distances(&self, a: ArrayView2<f64>, b: ArrayView2<f64>) -> NcaResult<Array1<f64>> {
        if a.dim() != b.dim() {
            return Err(NcaError::PairShapeMismatch { left: a.dim(), right: b.dim() });
        }
        let diff = self.transform((&a - &b).view())?;
        Ok(diff.map_axis(Axis(1), |row| row.dot(&row).sqrt()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    struct Fixed(Option<Array2<f64>>);

    impl MahalanobisTransform for Fixed {
        fn transformer(&self) -> NcaResult<&Array2<f64>> {
            self.0.as_ref().ok_or(NcaError::ModelNotFitted)
        }
    }

    #[test]
    // Purpose
    // -------
    // The metric matrix is LᵗL and pair distances agree with it.
    fn metric_matrix_and_pair_distances_are_consistent() {
        // Arrange
        let model = Fixed(Some(array![[2.0, 0.0], [1.0, 1.0]]));
        let a = array![[1.0, 0.0], [0.0, 0.0]];
        let b = array![[0.0, 0.0], [0.0, 2.0]];

        // Act
        let m = model.mahalanobis_matrix().unwrap();
        let dists = model.pair_distances(a.view(), b.view()).unwrap();

        // Assert
        assert_eq!(m, array![[5.0, 1.0], [1.0, 1.0]]);
        // (1, 0): ‖(2, 1)‖ = √5; (0, -2): ‖(0, -2)‖ = 2.
        assert_relative_eq!(dists[0], 5f64.sqrt(), epsilon = 1e-12);
        assert_relative_eq!(dists[1], 2.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Unfitted models and mis-shaped inputs are rejected.
    fn helpers_reject_unfitted_and_mismatched_inputs() {
        let unfitted = Fixed(None);
        let fitted = Fixed(Some(array![[1.0, 0.0, 0.0]]));

        assert_eq!(unfitted.mahalanobis_matrix().unwrap_err(), NcaError::ModelNotFitted);
        assert_eq!(
            fitted.transform(array![[1.0, 2.0]].view()).unwrap_err(),
            NcaError::FeatureMismatch { expected: 3, actual: 2 }
        );
        assert_eq!(
            fitted.pair_distances(array![[1.0, 2.0, 3.0]].view(), array![[1.0, 2.0]].view()).unwrap_err(),
            NcaError::PairShapeMismatch { left: (1, 3), right: (1, 2) }
        );
        assert_eq!(fitted.transform(array![[1.0, 2.0, 3.0]].view()).unwrap(), array![[1.0]]);
    }
}
