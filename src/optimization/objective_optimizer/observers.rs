//! Argmin observers owned by the optimizer layer.
//!
//! [`CostTrace`] records the cost after every accepted iteration so callers
//! can inspect the optimization path (e.g. to check monotone descent) without
//! enabling any logging backend.
use std::sync::{Arc, Mutex};

use argmin::core::{Error, IterState, KV, observers::Observe};

use crate::optimization::objective_optimizer::types::{Cost, Grad, Theta};

/// Shared, append-only record of per-iteration costs.
///
/// Cloning shares the underlying buffer: the executor owns one handle while
/// the runner keeps another to read the trace back after the run.
#[derive(Debug, Clone, Default)]
pub struct CostTrace {
    costs: Arc<Mutex<Vec<Cost>>>,
}

impl CostTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the costs recorded so far, in iteration order.
    pub fn snapshot(&self) -> Vec<Cost> {
        self.costs.lock().map(|costs| costs.clone()).unwrap_or_default()
    }
}

impl Observe<IterState<Theta, Grad, (), (), (), Cost>> for CostTrace {
    fn observe_iter(
        &mut self, state: &IterState<Theta, Grad, (), (), (), Cost>, _kv: &KV,
    ) -> Result<(), Error> {
        if let Ok(mut costs) = self.costs.lock() {
            costs.push(state.get_cost());
        }
        Ok(())
    }
}
