//! objective_optimizer::builders — L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Small builders for the L-BFGS solvers used by the objective optimizer.
//! They hide Argmin's generic wiring and apply crate-level options
//! (tolerances, memory size) so higher-level code can request a configured
//! solver without touching Argmin types.
//!
//! Conventions
//! -----------
//! - The builders do **not** set the initial parameter vector or
//!   `max_iters`; those are runtime concerns applied by `run_lbfgs`.
//! - Invalid tolerances rejected by Argmin surface as [`OptError`] through
//!   the crate's `From<Error>` conversion.
//!
//! [`OptError`]: crate::optimization::errors::OptError
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    objective_optimizer::{
        traits::OptimizerOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

/// Construct L-BFGS with Hager–Zhang line search and the configured
/// memory/tolerances.
///
/// # Errors
/// - `OptError` when Argmin rejects a tolerance.
pub fn build_optimizer_hager_zhang(opts: &OptimizerOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with More–Thuente line search and the configured
/// memory/tolerances.
///
/// # Errors
/// - `OptError` when Argmin rejects a tolerance.
pub fn build_optimizer_more_thuente(opts: &OptimizerOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply optional gradient-norm and cost-change tolerances to an L-BFGS
/// solver, regardless of its line-search type.
///
/// When a tolerance is `None` the corresponding `with_tolerance_*` method is
/// not called and Argmin's default stays in effect.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &OptimizerOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::objective_optimizer::traits::{LineSearcher, Tolerances};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction of L-BFGS solvers with both line searches.
    // - Propagation of `lbfgs_mem` (Some vs None).
    // - Application of tolerances via `configure_lbfgs`.
    //
    // End-to-end executor behavior is tested in the runner layer.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `build_optimizer_hager_zhang` succeeds with the default memory.
    fn build_optimizer_hager_zhang_uses_default_memory_when_none() {
        // Arrange
        let tols =
            Tolerances::new(Some(1e-6), Some(1e-8), Some(50)).expect("Tolerances should be valid");
        let opts = OptimizerOptions::new(tols, LineSearcher::HagerZhang, false, None)
            .expect("OptimizerOptions should be valid");

        // Act
        let solver = build_optimizer_hager_zhang(&opts);

        // Assert
        assert!(solver.is_ok(), "Builder should succeed when lbfgs_mem is None");
    }

    #[test]
    // Purpose
    // -------
    // `build_optimizer_more_thuente` accepts an explicit memory value.
    fn build_optimizer_more_thuente_respects_explicit_memory() {
        // Arrange
        let tols = Tolerances::new(Some(1e-6), None, Some(30)).expect("Tolerances should be valid");
        let opts = OptimizerOptions::new(tols, LineSearcher::MoreThuente, false, Some(9))
            .expect("OptimizerOptions should be valid");

        // Act
        let solver = build_optimizer_more_thuente(&opts);

        // Assert
        assert!(solver.is_ok(), "Builder should succeed when lbfgs_mem is explicitly provided");
    }

    #[test]
    // Purpose
    // -------
    // `configure_lbfgs` leaves the solver constructible when both tolerances
    // are `None`, relying on Argmin defaults.
    fn configure_lbfgs_respects_absent_tolerances() {
        // Arrange
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        let opts = OptimizerOptions::default();

        // Act
        let configured = configure_lbfgs(raw, &opts);

        // Assert
        assert!(configured.is_ok(), "configure_lbfgs should succeed when both tolerances are None");
    }
}
