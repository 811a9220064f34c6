//! High-level entry point for minimizing a user-provided [`Objective`].
//!
//! This selects an L-BFGS solver with either Hager–Zhang or More–Thuente line
//! search, wraps the objective in an [`ArgMinAdapter`] and delegates the run
//! to [`run_lbfgs`].
use crate::optimization::{
    errors::OptResult,
    objective_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        observers::CostTrace,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, Objective, OptimizerOptions},
        validation::validate_theta_input,
    },
};

/// Minimize an objective `c(θ)` using L-BFGS with the chosen line search.
///
/// # Behavior
/// - Rejects empty or non-finite starting points, then calls
///   `f.check(theta0, data)`.
/// - Builds an L-BFGS solver according to `opts.line_searcher`,
///   `opts.lbfgs_mem` and the tolerances in `opts.tols`.
/// - Calls [`run_lbfgs`], which applies `max_iter` and returns an
///   [`OptimOutcome`].
///
/// # Errors
/// - Validation errors for `theta0` and any error from `f.check`.
/// - Builder errors from `build_optimizer_*`.
/// - Runtime errors from `run_lbfgs` (objective failures, line search
///   failures).
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_metric_learn::optimization::{
///     errors::OptResult,
///     objective_optimizer::{minimize, Objective, OptimizerOptions, Theta},
/// };
///
/// struct Bowl;
/// impl Objective for Bowl {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = minimize(&Bowl, array![0.1, -0.2, 0.3], &(), &OptimizerOptions::default())?;
/// println!("θ̂ = {:?} after {} iterations", out.theta_hat, out.iterations);
/// # Ok::<(), rust_metric_learn::optimization::errors::OptError>(())
/// ```
pub fn minimize<F: Objective>(
    f: &F, theta0: Theta, data: &F::Data, opts: &OptimizerOptions,
) -> OptResult<OptimOutcome> {
    minimize_traced(f, theta0, data, opts, &CostTrace::new())
}

/// [`minimize`] recording accepted-iteration costs into a caller-owned
/// [`CostTrace`].
///
/// The trace outlives the run, so callers can still count accepted
/// iterations when the solver aborts with an error.
pub fn minimize_traced<F: Objective>(
    f: &F, theta0: Theta, data: &F::Data, opts: &OptimizerOptions, trace: &CostTrace,
) -> OptResult<OptimOutcome> {
    validate_theta_input(&theta0)?;
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            let solver = build_optimizer_more_thuente(opts)?;
            run_lbfgs(theta0, opts, problem, solver, trace)
        }
        LineSearcher::HagerZhang => {
            let solver = build_optimizer_hager_zhang(opts)?;
            run_lbfgs(theta0, opts, problem, solver, trace)
        }
    }
}
