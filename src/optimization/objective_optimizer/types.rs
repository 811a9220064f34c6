//! objective_optimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types and L-BFGS solver aliases used by the
//! objective optimizer so the rest of the optimization code can stay
//! agnostic to `ndarray` and Argmin generics.
//!
//! Conventions
//! -----------
//! - `Theta` and `Grad` are flat parameter/gradient vectors of equal length.
//!   Matrix-valued parameters (e.g. a k×d transform) are flattened
//!   row-major by the model layer before they reach the optimizer.
//! - `Cost` is the scalar the solver *minimizes*; any sign flip between an
//!   objective to maximize and the cost happens in the model layer.
//! - `DEFAULT_LBFGS_MEM` is the history size used when the caller does not
//!   override it.
//!
//! Testing notes
//! -------------
//! - Type aliases and constants only; exercised indirectly by the
//!   builder, runner and adapter tests.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::Array1;
use std::collections::HashMap;

/// Flattened parameter vector handed to the solver.
pub type Theta = Array1<f64>;

/// Gradient of the cost w.r.t. [`Theta`]; same length as `Theta`.
pub type Grad = Array1<f64>;

/// Scalar cost minimized by the solver.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps Argmin's counter names (e.g., `"cost_count"`, `"gradient_count"`)
/// to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Hager–Zhang line search specialized to this crate's numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate's numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
