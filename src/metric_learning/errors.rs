//! Errors for NCA metric learning (data validation, options checks,
//! objective shape invariants, and optimizer failures).
//!
//! This module defines the domain error type, [`NcaError`], used across the
//! Python-facing API and the internal Rust core. It implements
//! `Display`/`Error` and, with the `python-bindings` feature, converts to
//! `PyErr` for PyO3.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy). `row`/`col` refer to the
//!   sample and feature axes of the design matrix `X` (n×d).
//! - Constant features are **not** errors; their scale is floored instead.
//! - Optimizer/backend errors are normalized to
//!   [`NcaError::OptimizationFailed`] with a human-readable status.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};

use crate::optimization::errors::OptError;

/// Crate-wide result alias for NCA operations that may produce [`NcaError`].
pub type NcaResult<T> = Result<T, NcaError>;

/// Unified error type for NCA metric learning.
///
/// Covers input/data validation, options checks, objective shape invariants,
/// estimation failures and model state. Implements `Display`/`Error` and
/// converts to a Python `ValueError` at PyO3 boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum NcaError {
    // ---- Input/data validation ----
    /// Fewer than two samples; leave-one-out neighbors are undefined.
    TooFewSamples { n_samples: usize },

    /// `X` has zero columns.
    NoFeatures,

    /// Number of labels differs from the number of rows of `X`.
    LabelCountMismatch { n_samples: usize, n_labels: usize },

    /// A data point is NaN/±inf.
    NonFiniteData { row: usize, col: usize, value: f64 },

    /// Input to `transform` has a different number of columns than the
    /// data the model was fitted on.
    FeatureMismatch { expected: usize, actual: usize },

    // ---- Options validation ----
    /// Embedding dimension must be ≥ 1.
    InvalidEmbeddingDim { value: usize },

    /// max_iter must be ≥ 1.
    InvalidMaxIter { value: usize },

    /// tol must be finite and > 0.
    InvalidTolerance { value: f64 },

    /// L-BFGS memory must be ≥ 1.
    InvalidLbfgsMem { value: usize },

    /// Init::Fixed must be k×d.
    InvalidInitShape { expected: (usize, usize), actual: (usize, usize) },

    /// Init::Fixed entries must be finite.
    InvalidInitValue { row: usize, col: usize, value: f64 },

    // ---- Objective invariants ----
    /// Flattened transform length is not a positive multiple of d.
    TransformLengthMismatch { n_features: usize, actual: usize },

    /// Same-class mask is not n×n.
    MaskShapeMismatch { n_samples: usize, rows: usize, cols: usize },

    /// Pair arrays passed to `pair_distances` disagree in shape.
    PairShapeMismatch { left: (usize, usize), right: (usize, usize) },

    // ---- Estimation / optimizer ----
    /// Optimizer failed; include a human-readable status/reason.
    OptimizationFailed { status: String },

    /// Model hasn't been fitted yet.
    ModelNotFitted,
}

impl std::error::Error for NcaError {}

impl std::fmt::Display for NcaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            NcaError::TooFewSamples { n_samples } => {
                write!(f, "NCA needs at least 2 samples; got {n_samples}.")
            }
            NcaError::NoFeatures => {
                write!(f, "Input data has no features (zero columns).")
            }
            NcaError::LabelCountMismatch { n_samples, n_labels } => {
                write!(f, "Found {n_labels} labels for {n_samples} samples; counts must match.")
            }
            NcaError::NonFiniteData { row, col, value } => {
                write!(f, "Data point at row {row}, column {col} is non-finite: {value}")
            }
            NcaError::FeatureMismatch { expected, actual } => {
                write!(f, "Input has {actual} features, but the model was fitted on {expected}.")
            }
            // ---- Options validation ----
            NcaError::InvalidEmbeddingDim { value } => {
                write!(f, "Embedding dimension must be >= 1; got: {value}")
            }
            NcaError::InvalidMaxIter { value } => {
                write!(f, "max_iter must be >= 1; got: {value}")
            }
            NcaError::InvalidTolerance { value } => {
                write!(f, "tol must be finite and > 0; got: {value}")
            }
            NcaError::InvalidLbfgsMem { value } => {
                write!(f, "L-BFGS memory must be >= 1; got: {value}")
            }
            NcaError::InvalidInitShape { expected, actual } => {
                write!(
                    f,
                    "Init::Fixed must have shape {}x{}; got {}x{}",
                    expected.0, expected.1, actual.0, actual.1
                )
            }
            NcaError::InvalidInitValue { row, col, value } => {
                write!(f, "Init::Fixed entry at ({row}, {col}) is non-finite: {value}")
            }
            // ---- Objective invariants ----
            NcaError::TransformLengthMismatch { n_features, actual } => {
                write!(
                    f,
                    "Flattened transform of length {actual} is not a positive multiple of the feature count {n_features}."
                )
            }
            NcaError::MaskShapeMismatch { n_samples, rows, cols } => {
                write!(f, "Same-class mask must be {n_samples}x{n_samples}; got {rows}x{cols}.")
            }
            NcaError::PairShapeMismatch { left, right } => {
                write!(
                    f,
                    "Pair arrays must have the same shape; got {}x{} and {}x{}.",
                    left.0, left.1, right.0, right.1
                )
            }
            // ---- Estimation / optimizer ----
            NcaError::OptimizationFailed { status } => {
                write!(f, "Optimizer failed with status: {status}")
            }
            NcaError::ModelNotFitted => {
                write!(f, "Model hasn't been fitted yet.")
            }
        }
    }
}

/// Convert an [`NcaError`] into a Python `ValueError` with the error message.
///
/// This is used at the Rust↔Python boundary to surface domain errors cleanly.
#[cfg(feature = "python-bindings")]
impl std::convert::From<NcaError> for PyErr {
    fn from(err: NcaError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<OptError> for NcaError {
    fn from(err: OptError) -> NcaError {
        NcaError::OptimizationFailed { status: err.to_string() }
    }
}
