//! Neighborhood Components Analysis model.
//!
//! Purpose
//! -------
//! Learn a linear transform `L` (k×d) that maximizes the expected
//! leave-one-out accuracy of a stochastic nearest-neighbor classifier, and
//! expose it through [`MahalanobisTransform`].
//!
//! Key behaviors
//! -------------
//! - [`NcaModel::fit`] validates the data, builds `L₀` from the configured
//!   [`Init`](crate::metric_learning::core::init::Init), and runs L-BFGS via
//!   [`minimize_traced`] on [`NcaProblem`], the objective bound to sign `-1`.
//! - [`NcaProblem`] caches the last evaluation (argmin asks for cost and
//!   gradient separately at the same point), counts evaluations, remembers
//!   the best transform and forwards progress to a [`ProgressReporter`].
//! - Non-convergence is advisory: the transform is kept, `log::warn!` is
//!   emitted, and [`NcaFitInfo`] records the status. A solver abort (line
//!   search failure) falls back to the best transform evaluated so far; the
//!   iterations accepted before the abort are still counted.
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer parameter is the row-major flattening of `L`.
//! - A fitted model always holds a finite k×d transform.
//! - Single-threaded: the problem uses `RefCell`s for its bookkeeping.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the evaluation cache and counters, a small end-to-end
//!   fit, custom reporters, and error paths. Larger scenarios live in
//!   `tests/integration_nca_pipeline.rs`.
use std::{
    cell::RefCell,
    fmt,
    hash::Hash,
    time::{Duration, Instant},
};

use log::{debug, info, warn};
use ndarray::{Array1, Array2, ArrayView2};

use crate::{
    metric_learning::{
        core::{
            data::{NcaData, SameClassMask},
            objective::{Evaluation, evaluate, reshape_transform},
            options::NcaOptions,
            progress::{LogReporter, Progress, ProgressReporter},
            state::{OptimizationState, TerminationState},
        },
        errors::{NcaError, NcaResult},
        models::mahalanobis::MahalanobisTransform,
    },
    optimization::{
        errors::OptResult,
        objective_optimizer::{Cost, CostTrace, Grad, Objective, Theta, minimize_traced},
    },
};

/// Sign applied to the NCA loss so the minimizer maximizes it.
const MINIMIZE_SIGN: f64 = -1.0;

/// Training set as seen by the objective: validated data plus its mask.
#[derive(Debug, Clone, PartialEq)]
pub struct NcaInputs {
    pub data: NcaData,
    pub mask: SameClassMask,
}

impl NcaInputs {
    pub fn new(data: NcaData) -> Self {
        let mask = data.same_class_mask();
        NcaInputs { data, mask }
    }
}

/// NCA objective wrapper handed to the optimizer.
pub struct NcaProblem {
    cache: RefCell<Option<(Theta, Evaluation)>>,
    state: RefCell<OptimizationState>,
    reporter: RefCell<Option<Box<dyn ProgressReporter>>>,
}

impl NcaProblem {
    pub fn new(reporter: Option<Box<dyn ProgressReporter>>) -> Self {
        NcaProblem {
            cache: RefCell::new(None),
            state: RefCell::new(OptimizationState::new()),
            reporter: RefCell::new(reporter),
        }
    }

    /// Signed evaluation at `theta`, served from the cache when `theta`
    /// matches the previous call.
    pub fn evaluate_at(&self, theta: &Theta, inputs: &NcaInputs) -> NcaResult<Evaluation> {
        if let Some((cached_theta, cached)) = self.cache.borrow().as_ref() {
            if cached_theta == theta {
                return Ok(cached.clone());
            }
        }

        let start = Instant::now();
        let eval = evaluate(theta.view(), inputs.data.x.view(), &inputs.mask, MINIMIZE_SIGN)?;
        let elapsed_seconds = start.elapsed().as_secs_f64();

        let objective = MINIMIZE_SIGN * eval.loss;
        let iteration = self.state.borrow_mut().record(theta, objective);
        if let Some(reporter) = self.reporter.borrow_mut().as_mut() {
            reporter.report(&Progress { iteration, objective, elapsed_seconds });
        }

        *self.cache.borrow_mut() = Some((theta.clone(), eval.clone()));
        Ok(eval)
    }

    pub fn evaluations(&self) -> u64 {
        self.state.borrow().evaluations
    }

    /// Consume the problem, returning its bookkeeping and reporter.
    pub fn into_parts(self) -> (OptimizationState, Option<Box<dyn ProgressReporter>>) {
        (self.state.into_inner(), self.reporter.into_inner())
    }
}

impl fmt::Debug for NcaProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NcaProblem").field("state", &self.state).finish_non_exhaustive()
    }
}

impl Objective for NcaProblem {
    type Data = NcaInputs;

    fn value(&self, theta: &Theta, data: &NcaInputs) -> OptResult<Cost> {
        Ok(self.evaluate_at(theta, data)?.loss)
    }

    fn check(&self, theta: &Theta, data: &NcaInputs) -> OptResult<()> {
        data.mask.check_dim(data.data.n_samples())?;
        reshape_transform(theta.view(), data.data.n_features())?;
        Ok(())
    }

    fn grad(&self, theta: &Theta, data: &NcaInputs) -> OptResult<Grad> {
        Ok(self.evaluate_at(theta, data)?.gradient)
    }
}

/// Summary of the last fit.
///
/// Fields
/// ------
/// - `n_iter`: L-BFGS iterations performed. After a solver abort, the
///   iterations accepted before it.
/// - `n_evaluations`: objective evaluations performed (cache hits excluded).
/// - `converged`: `true` only for [`TerminationState::Converged`].
/// - `status` / `message`: termination state and its human-readable form.
/// - `objective`: un-signed loss at the returned transform.
/// - `cost_trace`: signed cost of each accepted iteration.
/// - `train_time`: wall-clock duration of `fit`.
#[derive(Debug, Clone, PartialEq)]
pub struct NcaFitInfo {
    pub n_iter: usize,
    pub n_evaluations: u64,
    pub converged: bool,
    pub status: TerminationState,
    pub message: String,
    pub objective: f64,
    pub cost_trace: Vec<f64>,
    pub train_time: Duration,
}

/// NCA estimator: options, an optional custom reporter, and the fitted
/// transform.
pub struct NcaModel {
    pub options: NcaOptions,
    transformer: Option<Array2<f64>>,
    fit_info: Option<NcaFitInfo>,
    reporter: Option<Box<dyn ProgressReporter>>,
}

impl NcaModel {
    pub fn new(options: NcaOptions) -> Self {
        NcaModel { options, transformer: None, fit_info: None, reporter: None }
    }

    /// Install a reporter that receives every evaluation, regardless of
    /// `options.verbose`.
    pub fn with_reporter(mut self, reporter: Box<dyn ProgressReporter>) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn fit_info(&self) -> Option<&NcaFitInfo> {
        self.fit_info.as_ref()
    }

    /// Fit the transform on `x` (n×d) with one label per row.
    ///
    /// Behavior
    /// --------
    /// 1. Validates `x`/`y` into [`NcaData`] and resolves `k`.
    /// 2. Builds `L₀` and flattens it row-major.
    /// 3. Minimizes `-loss` with L-BFGS.
    /// 4. Stores the transform and an [`NcaFitInfo`]; warns when the run did
    ///    not converge.
    ///
    /// Errors
    /// ------
    /// - Data and options validation errors.
    /// - `NcaError::OptimizationFailed` for objective failures, or for a
    ///   solver abort before any point was evaluated.
    pub fn fit<T: Eq + Hash>(&mut self, x: ArrayView2<f64>, y: &[T]) -> NcaResult<&NcaFitInfo> {
        let start = Instant::now();
        let data = NcaData::new(x, y)?;
        let n_features = data.n_features();
        let k = self.options.resolve_embedding_dim(n_features);
        debug!(
            "NCA fit: n_samples={}, n_features={}, embedding_dim={}, n_classes={}",
            data.n_samples(),
            n_features,
            k,
            data.n_classes
        );

        let l0 = self.options.init.initial_transform(data.x.view(), k)?;
        let theta0 = l0.iter().copied().collect::<Array1<f64>>();
        let opt_opts = self.options.to_optimizer_options()?;
        let inputs = NcaInputs::new(data);

        let has_custom_reporter = self.reporter.is_some();
        let reporter = self.reporter.take().or_else(|| {
            self.options.verbose.then(|| Box::new(LogReporter::new()) as Box<dyn ProgressReporter>)
        });
        let problem = NcaProblem::new(reporter);
        let trace = CostTrace::new();
        let result = minimize_traced(&problem, theta0, &inputs, &opt_opts, &trace);
        let (mut state, reporter) = problem.into_parts();
        if has_custom_reporter {
            self.reporter = reporter;
        }

        let (theta_hat, objective, n_iter, cost_trace, message) = match result {
            Ok(outcome) => {
                let status = if outcome.converged {
                    TerminationState::Converged
                } else if outcome.max_iters_reached {
                    TerminationState::IterationLimitReached
                } else {
                    TerminationState::Failed(outcome.status.clone())
                };
                state.finish(status);
                (
                    outcome.theta_hat,
                    MINIMIZE_SIGN * outcome.value,
                    outcome.iterations,
                    outcome.cost_trace,
                    outcome.status,
                )
            }
            Err(err) if err.is_solver_failure() => {
                let (Some(best_theta), Some(best_loss)) = (state.best_theta.clone(), state.best_loss)
                else {
                    return Err(err.into());
                };
                let message = err.to_string();
                state.finish(TerminationState::Failed(message.clone()));
                let accepted = trace.snapshot();
                (best_theta, best_loss, accepted.len(), accepted, message)
            }
            Err(err) => return Err(err.into()),
        };

        let converged = state.status == TerminationState::Converged;
        if !converged {
            warn!("[NCA] NCA did not converge: {message}");
        }

        self.transformer = Some(reshape_transform(theta_hat.view(), n_features)?);
        let train_time = start.elapsed();
        if self.options.verbose {
            info!("[NCA] Training took {:8.2}s.", train_time.as_secs_f64());
        }

        let info = self.fit_info.insert(NcaFitInfo {
            n_iter,
            n_evaluations: state.evaluations,
            converged,
            status: state.status,
            message,
            objective,
            cost_trace,
            train_time,
        });
        Ok(info)
    }
}

impl MahalanobisTransform for NcaModel {
    fn transformer(&self) -> NcaResult<&Array2<f64>> {
        self.transformer.as_ref().ok_or(NcaError::ModelNotFitted)
    }
}

impl fmt::Debug for NcaModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NcaModel")
            .field("options", &self.options)
            .field("transformer", &self.transformer)
            .field("fit_info", &self.fit_info)
            .finish_non_exhaustive()
    }
}
