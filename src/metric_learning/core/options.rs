//! NCA options — configuration for fitting.
//!
//! Purpose
//! -------
//! Collect the knobs for an NCA fit in one validated struct: embedding
//! dimension, iteration cap, tolerance, verbosity, line search, L-BFGS
//! memory and the initialization policy.
//!
//! Key behaviors
//! -------------
//! - [`NcaOptions::new`] validates every field once; [`NcaOptions::default`]
//!   mirrors the usual defaults (`max_iter = 100`, no tolerance, quiet,
//!   More–Thuente, scaling init).
//! - [`NcaOptions::to_optimizer_options`] translates these into the generic
//!   [`OptimizerOptions`] consumed by `minimize`, mapping `tol` onto both the
//!   gradient-norm and cost-change criteria.
//!
//! Invariants & assumptions
//! ------------------------
//! - `embedding_dim`, when set, is ≥ 1; `None` means "same as the number of
//!   features".
//! - `max_iter ≥ 1`; `tol`, when set, is finite and > 0.
//! - The shape of `Init::Fixed` is checked at fit time, when `d` is known.
use crate::{
    metric_learning::{
        core::init::Init,
        errors::{NcaError, NcaResult},
    },
    optimization::objective_optimizer::{LineSearcher, OptimizerOptions, Tolerances},
};

/// Validated configuration for [`NcaModel`](crate::metric_learning::models::nca::NcaModel).
///
/// Fields
/// ------
/// - `embedding_dim`: `Option<usize>`
///   Rows `k` of the learned transform; `None` uses the feature count.
/// - `max_iter`: `usize`
///   Iteration cap for L-BFGS.
/// - `tol`: `Option<f64>`
///   Convergence tolerance; `None` keeps the optimizer defaults.
/// - `verbose`: `bool`
///   Install a [`LogReporter`](crate::metric_learning::core::progress::LogReporter)
///   and log the training time.
/// - `line_searcher`: [`LineSearcher`]
/// - `lbfgs_mem`: `Option<usize>`
///   L-BFGS history length; `None` uses the crate default.
/// - `init`: [`Init`]
#[derive(Debug, Clone, PartialEq)]
pub struct NcaOptions {
    pub embedding_dim: Option<usize>,
    pub max_iter: usize,
    pub tol: Option<f64>,
    pub verbose: bool,
    pub line_searcher: LineSearcher,
    pub lbfgs_mem: Option<usize>,
    pub init: Init,
}

impl NcaOptions {
    /// Construct validated options.
    ///
    /// Errors
    /// ------
    /// - `NcaError::InvalidEmbeddingDim` for `Some(0)`.
    /// - `NcaError::InvalidMaxIter` for `0`.
    /// - `NcaError::InvalidTolerance` for a non-finite or non-positive `tol`.
    /// - `NcaError::InvalidLbfgsMem` for `Some(0)`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        embedding_dim: Option<usize>, max_iter: usize, tol: Option<f64>, verbose: bool,
        line_searcher: LineSearcher, lbfgs_mem: Option<usize>, init: Init,
    ) -> NcaResult<Self> {
        if let Some(0) = embedding_dim {
            return Err(NcaError::InvalidEmbeddingDim { value: 0 });
        }
        if max_iter == 0 {
            return Err(NcaError::InvalidMaxIter { value: max_iter });
        }
        if let Some(value) = tol {
            if !value.is_finite() || value <= 0.0 {
                return Err(NcaError::InvalidTolerance { value });
            }
        }
        if let Some(0) = lbfgs_mem {
            return Err(NcaError::InvalidLbfgsMem { value: 0 });
        }
        Ok(NcaOptions { embedding_dim, max_iter, tol, verbose, line_searcher, lbfgs_mem, init })
    }

    /// Embedding dimension for data with `n_features` columns.
    pub fn resolve_embedding_dim(&self, n_features: usize) -> usize {
        self.embedding_dim.unwrap_or(n_features)
    }

    /// Translate into generic optimizer options.
    ///
    /// `verbose` is forwarded, so builds with `obs_slog` also attach the
    /// solver-level slog observer.
    pub fn to_optimizer_options(&self) -> NcaResult<OptimizerOptions> {
        let tols = Tolerances::from_tol(self.tol, self.max_iter)?;
        Ok(OptimizerOptions::new(tols, self.line_searcher, self.verbose, self.lbfgs_mem)?)
    }
}

impl Default for NcaOptions {
    fn default() -> Self {
        NcaOptions {
            embedding_dim: None,
            max_iter: 100,
            tol: None,
            verbose: false,
            line_searcher: LineSearcher::MoreThuente,
            lbfgs_mem: None,
            init: Init::Scaling,
        }
    }
}
