//! core — NCA data, initialization, objective, options and bookkeeping.
//!
//! Purpose
//! -------
//! Collect the building blocks of Neighborhood Components Analysis that the
//! model layer composes: validated inputs, the starting transform, the pure
//! objective/gradient evaluator, configuration, optimization bookkeeping and
//! progress reporting.
//!
//! Key behaviors
//! -------------
//! - [`data`]: [`NcaData`] (validated `X` plus dense label codes) and
//!   [`SameClassMask`].
//! - [`init`]: inverse-range scaling ([`scaling_init`]) and the [`Init`]
//!   policy.
//! - [`objective`]: [`evaluate`] plus the intermediate distance and
//!   probability helpers.
//! - [`options`]: [`NcaOptions`] and their translation into optimizer
//!   options.
//! - [`state`] / [`progress`]: evaluation counters, best point, termination
//!   status, and the [`ProgressReporter`] observer.
//!
//! Conventions
//! -----------
//! - Transforms are k×d `Array2<f64>`; the optimizer sees them flattened
//!   row-major.
//! - Only [`progress`] logs; everything else is silent and reports failures
//!   through [`NcaResult`](crate::metric_learning::errors::NcaResult).

pub mod data;
pub mod init;
pub mod objective;
pub mod options;
pub mod progress;
pub mod state;

pub use self::data::{NcaData, SameClassMask, encode_labels};
pub use self::init::{Init, scaling_init};
pub use self::objective::{
    Evaluation, class_probabilities, evaluate, neighbor_probabilities, pairwise_sq_distances,
};
pub use self::options::NcaOptions;
pub use self::progress::{LogReporter, Progress, ProgressReporter};
pub use self::state::{OptimizationState, TerminationState};
