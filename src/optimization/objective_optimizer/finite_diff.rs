//! objective_optimizer::finite_diff — finite-difference gradient helpers.
//!
//! Purpose
//! -------
//! Provide finite-difference gradients around a parameter vector with error
//! capture and validation, so the adapter and the model layer's derivative
//! checks do not depend directly on the `finitediff` API.
//!
//! Key behaviors
//! -------------
//! - [`run_fd_diff`]: forward differences with a captured error side channel,
//!   used by the adapter as the fallback path.
//! - [`central_fd_grad`]: central differences of an infallible closure, used
//!   to cross-check analytic gradients.
//!
//! Invariants & assumptions
//! ------------------------
//! - Any error raised by the user objective during finite differencing is
//!   routed into `closure_err` and treated as a hard failure.
//! - Gradients returned here satisfy [`validate_grad`].
use crate::optimization::{
    errors::OptResult,
    objective_optimizer::{Grad, Theta, validation::validate_grad},
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient with error capture and validation.
///
/// `func` is expected to write any evaluation error into `closure_err` and
/// return `NaN`; the cell is cleared on entry and inspected afterwards.
///
/// # Errors
/// - The captured Argmin error, converted into `OptError`.
/// - `OptError::GradientDimMismatch` / `OptError::InvalidGradient` from
///   [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    let dim = theta.len();
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}

/// Central-difference gradient of an infallible scalar function.
///
/// # Errors
/// - `OptError::InvalidGradient` if any component is not finite.
pub fn central_fd_grad<G: Fn(&Theta) -> f64>(theta: &Theta, func: &G) -> OptResult<Grad> {
    let fd_grad = theta.central_diff(func);
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}
