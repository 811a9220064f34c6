//! objective_optimizer — argmin-powered L-BFGS minimizer behind a narrow API.
//!
//! Purpose
//! -------
//! Provide the crate's single optimization entry point,
//! [`minimize`]`(objective, θ₀, data, options)`, so model code never touches
//! Argmin directly. Callers implement [`Objective`] and receive an
//! [`OptimOutcome`] with the final parameters, iteration count, a success
//! flag and a status message.
//!
//! Key behaviors
//! -------------
//! - Expose user objectives to Argmin via [`adapter::ArgMinAdapter`], with a
//!   finite-difference fallback when no analytic gradient is provided
//!   ([`finite_diff`]).
//! - Build L-BFGS with More–Thuente or Hager–Zhang line search
//!   ([`builders`]) and run it ([`run::run_lbfgs`]) with an iteration cap and
//!   optional tolerances.
//! - Record the cost of every accepted iteration ([`observers::CostTrace`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always minimizes**. Problems that maximize fold the sign
//!   into their objective.
//! - Parameters are flat `Array1<f64>` vectors ([`Theta`]); reshaping into
//!   matrices is the model layer's job.
//! - Errors bubble up as `OptResult<T>`; this module never intentionally
//!   panics or uses `unsafe`.
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule cover adapter pass-through and FD
//!   fallback, builder wiring, termination classification, and end-to-end
//!   runs on a convex bowl in [`api`].

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod observers;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{minimize, minimize_traced};
pub use self::observers::CostTrace;
pub use self::traits::{LineSearcher, Objective, OptimOutcome, OptimizerOptions, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

pub mod prelude {
    pub use super::api::{minimize, minimize_traced};
    pub use super::traits::{LineSearcher, Objective, OptimOutcome, OptimizerOptions, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
