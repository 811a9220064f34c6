//! Execution helper that runs an `argmin` solver on an [`Objective`] and
//! returns a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    objective_optimizer::{
        Grad, Objective, OptimOutcome, OptimizerOptions, Theta, adapter::ArgMinAdapter,
        observers::CostTrace,
    },
};
use argmin::core::{Executor, State, observers::ObserverMode};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Run an `argmin` optimization for an objective problem.
///
/// Shared runner for both line-search variants. It wires up:
/// - the user problem via [`ArgMinAdapter`],
/// - the chosen `Solver` (L-BFGS with Hager–Zhang/More–Thuente),
/// - the initial parameter `theta0` (consumed),
/// - the caller's [`CostTrace`] observer recording every accepted
///   iteration (readable even when the run aborts),
/// - optional slog observer (behind the `obs_slog` feature),
/// - optional `max_iters`,
///
/// then executes the solver and converts the final state into
/// [`OptimOutcome`].
///
/// # Errors
/// - Any `argmin` runtime error (objective failures, line-search failures)
///   via `From<argmin::core::Error>`.
/// - Validation errors raised while constructing [`OptimOutcome`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &OptimizerOptions, problem: ArgMinAdapter<'a, F>, solver: S,
    trace: &CostTrace,
) -> OptResult<OptimOutcome>
where
    F: Objective,
    S: argmin::core::Solver<
            ArgMinAdapter<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    optimizer = optimizer.add_observer(trace.clone(), ObserverMode::Always);
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    OptimOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
        trace.snapshot(),
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: Objective,
{
    let c0 = problem.cost(theta0)?;
    let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());

    log::info!(
        "init: cost(theta0) = {:.6}{}",
        c0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}
