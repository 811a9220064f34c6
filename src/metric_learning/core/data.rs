//! NCA data containers: validated design matrix, encoded labels and the
//! same-class mask.
//!
//! Purpose
//! -------
//! Provide small, validated containers for the inputs of Neighborhood
//! Components Analysis. This module centralizes input validation for the
//! design matrix `X` and its labels, and turns arbitrary hashable labels into
//! dense integer codes so the objective only ever compares `usize` values.
//!
//! Key behaviors
//! -------------
//! - [`NcaData`] enforces basic data invariants (at least two samples, at
//!   least one feature, finite entries, one label per row).
//! - [`encode_labels`] maps labels to codes `0..n_classes` in first-seen
//!   order.
//! - [`SameClassMask`] stores the boolean n×n matrix `mask[i][j] =
//!   code[i] == code[j]` consumed by the objective.
//!
//! Invariants & assumptions
//! ------------------------
//! - `X` is n×d with `n ≥ 2`, `d ≥ 1`, and every entry finite.
//! - `labels.len() == n` and every code is `< n_classes`.
//! - The mask is symmetric with a `true` diagonal; the diagonal never
//!   contributes to the objective because self-probabilities are zero.
//!
//! Conventions
//! -----------
//! - Rows of `X` are samples, columns are features; indexing is 0-based.
//! - Containers are immutable once built; fitting never mutates them.
//!
//! Testing notes
//! -------------
//! - Unit tests cover `NcaData::new` (happy path, too few samples, no
//!   features, label count mismatch, non-finite data), label encoding order,
//!   and mask symmetry.
use crate::metric_learning::errors::{NcaError, NcaResult};
use ndarray::{Array1, Array2, ArrayView2};
use std::{collections::HashMap, hash::Hash};

/// `NcaData` — validated design matrix plus dense label codes.
///
/// Purpose
/// -------
/// Represent one labeled training set for NCA. Construction runs every input
/// check once so downstream code (initialization, objective, driver) can
/// assume clean data.
///
/// Fields
/// ------
/// - `x`: `Array2<f64>`
///   Design matrix, n×d, finite.
/// - `labels`: `Array1<usize>`
///   Dense class codes in `0..n_classes`, one per row of `x`.
/// - `n_classes`: `usize`
///   Number of distinct labels seen.
///
/// Invariants
/// ----------
/// - `x.nrows() >= 2`, `x.ncols() >= 1`.
/// - `labels.len() == x.nrows()`.
///
/// Performance
/// -----------
/// - Validation is O(n·d); label encoding is O(n) expected time.
#[derive(Debug, Clone, PartialEq)]
pub struct NcaData {
    /// Design matrix (n×d, finite).
    pub x: Array2<f64>,
    /// Dense label codes, one per row.
    pub labels: Array1<usize>,
    /// Number of distinct classes.
    pub n_classes: usize,
}

impl NcaData {
    /// Construct a validated [`NcaData`] from a design matrix and raw labels.
    ///
    /// Parameters
    /// ----------
    /// - `x`: `ArrayView2<f64>`
    ///   n×d design matrix. Copied into the container.
    /// - `y`: `&[T]`
    ///   One label per row of `x`; any `Eq + Hash` type.
    ///
    /// Errors
    /// ------
    /// - `NcaError::TooFewSamples` when `n < 2`.
    /// - `NcaError::NoFeatures` when `d == 0`.
    /// - `NcaError::LabelCountMismatch` when `y.len() != n`.
    /// - `NcaError::NonFiniteData { row, col, value }` for the first NaN/±∞
    ///   entry in row-major order.
    pub fn new<T: Eq + Hash>(x: ArrayView2<f64>, y: &[T]) -> NcaResult<Self> {
        let (n_samples, n_features) = x.dim();
        if n_samples < 2 {
            return Err(NcaError::TooFewSamples { n_samples });
        }
        if n_features == 0 {
            return Err(NcaError::NoFeatures);
        }
        if y.len() != n_samples {
            return Err(NcaError::LabelCountMismatch { n_samples, n_labels: y.len() });
        }
        validate_finite(x)?;

        let (labels, n_classes) = encode_labels(y);
        Ok(NcaData { x: x.to_owned(), labels, n_classes })
    }

    pub fn n_samples(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Build the same-class mask for these labels.
    pub fn same_class_mask(&self) -> SameClassMask {
        SameClassMask::from_labels(&self.labels)
    }
}

/// Check that every entry of `x` is finite.
///
/// Errors
/// ------
/// - `NcaError::NonFiniteData` pointing at the first offending entry.
pub fn validate_finite(x: ArrayView2<f64>) -> NcaResult<()> {
    for ((row, col), &value) in x.indexed_iter() {
        if !value.is_finite() {
            return Err(NcaError::NonFiniteData { row, col, value });
        }
    }
    Ok(())
}

/// Map labels to dense codes in first-seen order.
///
/// Returns the code vector and the number of distinct labels.
pub fn encode_labels<T: Eq + Hash>(y: &[T]) -> (Array1<usize>, usize) {
    let mut codes: HashMap<&T, usize> = HashMap::with_capacity(y.len());
    let encoded = y
        .iter()
        .map(|label| {
            let next = codes.len();
            *codes.entry(label).or_insert(next)
        })
        .collect::<Array1<usize>>();
    (encoded, codes.len())
}

/// Boolean n×n matrix with `mask[i][j] = (label_i == label_j)`.
#[derive(Debug, Clone, PartialEq)]
pub struct SameClassMask {
    mask: Array2<bool>,
}

impl SameClassMask {
    pub fn from_labels(labels: &Array1<usize>) -> Self {
        let n = labels.len();
        let mask = Array2::from_shape_fn((n, n), |(i, j)| labels[i] == labels[j]);
        SameClassMask { mask }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.mask.dim()
    }

    pub fn get(&self, i: usize, j: usize) -> bool {
        self.mask[[i, j]]
    }

    /// 0/1 view of the mask for elementwise products.
    pub fn as_weights(&self) -> Array2<f64> {
        self.mask.mapv(|same| if same { 1.0 } else { 0.0 })
    }

    /// Fail unless the mask is `n_samples`×`n_samples`.
    pub fn check_dim(&self, n_samples: usize) -> NcaResult<()> {
        let (rows, cols) = self.dim();
        if rows != n_samples || cols != n_samples {
            return Err(NcaError::MaskShapeMismatch { n_samples, rows, cols });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Happy-path construction and each validation failure of `NcaData::new`.
    // - First-seen label encoding for non-integer labels.
    // - Symmetry and shape checks of `SameClassMask`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Valid inputs are stored unchanged and labels are encoded densely.
    //
    // Given
    // -----
    // - 3×2 matrix with string labels ["b", "a", "b"].
    //
    // Expect
    // ------
    // - Codes [0, 1, 0], two classes, x copied verbatim.
    fn new_accepts_valid_input_and_encodes_labels() {
        // Arrange
        let x = array![[0.0, 1.0], [2.0, 3.0], [4.0, 5.0]];
        let y = ["b", "a", "b"];

        // Act
        let data = NcaData::new(x.view(), &y).expect("valid data");

        // Assert
        assert_eq!(data.x, x);
        assert_eq!(data.labels, array![0, 1, 0]);
        assert_eq!(data.n_classes, 2);
        assert_eq!((data.n_samples(), data.n_features()), (3, 2));
    }

    #[test]
    // Purpose
    // -------
    // Each structural problem with the inputs is reported by its own variant.
    fn new_rejects_structurally_invalid_inputs() {
        let one_row = array![[1.0, 2.0]];
        assert_eq!(
            NcaData::new(one_row.view(), &[0]).unwrap_err(),
            NcaError::TooFewSamples { n_samples: 1 }
        );

        let no_cols = Array2::<f64>::zeros((3, 0));
        assert_eq!(NcaData::new(no_cols.view(), &[0, 1, 2]).unwrap_err(), NcaError::NoFeatures);

        let x = array![[1.0], [2.0], [3.0]];
        assert_eq!(
            NcaData::new(x.view(), &[0, 1]).unwrap_err(),
            NcaError::LabelCountMismatch { n_samples: 3, n_labels: 2 }
        );
    }

    #[test]
    // Purpose
    // -------
    // The first non-finite entry in row-major order is reported.
    fn new_reports_first_non_finite_entry() {
        // Arrange
        let x = array![[1.0, 2.0], [3.0, f64::INFINITY], [f64::NAN, 0.0]];

        // Act
        let err = NcaData::new(x.view(), &[0, 1, 0]).unwrap_err();

        // Assert
        assert_eq!(err, NcaError::NonFiniteData { row: 1, col: 1, value: f64::INFINITY });
    }

    #[test]
    // Purpose
    // -------
    // The mask is symmetric, true on the diagonal, and rejects wrong sizes.
    fn same_class_mask_is_symmetric_and_checks_dim() {
        // Arrange
        let labels = array![0, 1, 0, 2];

        // Act
        let mask = SameClassMask::from_labels(&labels);

        // Assert
        for i in 0..4 {
            assert!(mask.get(i, i));
            for j in 0..4 {
                assert_eq!(mask.get(i, j), mask.get(j, i));
            }
        }
        assert!(mask.get(0, 2));
        assert!(!mask.get(0, 1));
        assert!(mask.check_dim(4).is_ok());
        assert_eq!(
            mask.check_dim(3).unwrap_err(),
            NcaError::MaskShapeMismatch { n_samples: 3, rows: 4, cols: 4 }
        );
    }
}
