//! Mutable bookkeeping for an in-progress NCA optimization.
//!
//! [`OptimizationState`] keeps the evaluation counter, the most recent loss
//! and the best flattened transform seen so far. It lives in the problem
//! wrapper that the optimizer calls, never in the pure objective.
use crate::optimization::objective_optimizer::Theta;

/// Where the optimization currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TerminationState {
    #[default]
    Running,
    Converged,
    IterationLimitReached,
    /// Solver aborted (e.g. line search failure); message kept for reporting.
    Failed(String),
}

/// Evaluation counter, last loss and best point for one fit.
///
/// Invariants
/// ----------
/// - `evaluations` never decreases.
/// - `best_loss` is the largest un-signed loss recorded, and `best_theta`
///   the point where it was observed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptimizationState {
    pub evaluations: u64,
    pub last_loss: Option<f64>,
    pub best_loss: Option<f64>,
    pub best_theta: Option<Theta>,
    pub status: TerminationState,
}

impl OptimizationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one evaluation of the un-signed loss at `theta` and return the
    /// 0-based index of this evaluation.
    pub fn record(&mut self, theta: &Theta, loss: f64) -> u64 {
        let index = self.evaluations;
        self.evaluations += 1;
        self.last_loss = Some(loss);
        if self.best_loss.map_or(true, |best| loss > best) {
            self.best_loss = Some(loss);
            self.best_theta = Some(theta.clone());
        }
        index
    }

    pub fn finish(&mut self, status: TerminationState) {
        self.status = status;
    }
}
