//! optimization — L-BFGS stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for model fitting: an
//! Argmin-backed objective minimizer, numerically stable softmax helpers,
//! and a single error/result surface. Model code implements an objective,
//! chooses tolerances, and obtains fitted parameters and diagnostics without
//! touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **minimizing objectives** `c(θ)`
//!   (`objective_optimizer`), including solver and stopping-criteria
//!   configuration.
//! - Supply shared numerical primitives (`numerical_stability`) such as a
//!   log-sum-exp that tolerates `-∞` entries.
//! - Normalize configuration issues, numerical failures, and backend solver
//!   errors into a single enum (`errors::OptError`) with a common result
//!   alias (`OptResult<T>`).
//!
//! Conventions
//! -----------
//! - Parameters and gradients are `ndarray` vectors (`Theta`, `Grad`).
//! - Public entrypoints that can fail return `OptResult<T>`; callers never see
//!   raw Argmin errors.
//! - This module does no logging of its own; the model layer reports
//!   progress. The only exception is the optional `obs_slog` observer.

pub mod errors;
pub mod numerical_stability;
pub mod objective_optimizer;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::numerical_stability::prelude::*;
    pub use super::objective_optimizer::prelude::*;
}
