//! metric_learning — Neighborhood Components Analysis: data, objective,
//! model and errors.
//!
//! Purpose
//! -------
//! Provide the crate's metric-learning layer. NCA learns a linear transform
//! `L` that maximizes the expected leave-one-out accuracy of a softmax
//! nearest-neighbor classifier; the learned `L` defines the Mahalanobis
//! metric `M = LᵗL`.
//!
//! Key behaviors
//! -------------
//! - [`core`] holds validated inputs, the initial transform, the pure
//!   objective/gradient evaluator, options, state and progress reporting.
//! - [`models`] exposes [`NcaModel`] (`fit` / `transform`) and the
//!   [`MahalanobisTransform`] helpers.
//! - [`errors`] centralizes [`NcaError`] and [`NcaResult`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite, with at least two samples and one feature.
//! - Neighbor probability rows sum to one with a zero diagonal; the loss lies
//!   in `[0, n]`.
//! - Fitting is single-threaded; a model instance must not be shared across
//!   threads while fitting.
//!
//! Conventions
//! -----------
//! - `X` is n×d (rows are samples); `L` is k×d; embeddings are `X·Lᵗ`.
//! - Optimization is delegated to
//!   [`objective_optimizer`](crate::optimization::objective_optimizer), which
//!   minimizes; the NCA loss is passed with sign `-1`.
//! - Logging goes through the `log` facade: per-evaluation rows and training
//!   time at `info` when verbose, non-convergence at `warn`, setup at `debug`.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{Init, NcaData, NcaOptions, Progress, ProgressReporter, TerminationState};
pub use self::errors::{NcaError, NcaResult};
pub use self::models::{MahalanobisTransform, NcaFitInfo, NcaModel};

pub mod prelude {
    pub use super::core::{Init, LogReporter, NcaOptions, Progress, ProgressReporter};
    pub use super::errors::{NcaError, NcaResult};
    pub use super::models::{MahalanobisTransform, NcaFitInfo, NcaModel};
}
