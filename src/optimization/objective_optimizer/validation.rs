//! Validation helpers for objective optimization.
//!
//! - **Tolerance checks**: [`verify_tol_grad`], [`verify_tol_cost`] ensure
//!   numeric tolerances are finite and strictly positive when provided.
//! - **Parameter input**: [`validate_theta_input`] rejects non-finite
//!   starting points before any solver work is done.
//! - **Gradient validation**: [`validate_grad`] enforces correct dimension
//!   and finite entries.
//! - **Parameter estimates**: [`validate_theta_hat`] ensures a candidate
//!   `theta_hat` exists and contains only finite values.
//! - **Objective values**: [`validate_value`] checks cost outputs for
//!   finiteness.
use crate::optimization::{
    errors::{OptError, OptResult},
    objective_optimizer::{Grad, Theta},
};

/// Validate the optional gradient-norm tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional cost-change tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate a starting parameter vector: non-empty and all finite.
///
/// # Errors
/// - [`OptError::ThetaLengthMismatch`] if `theta` is empty.
/// - [`OptError::InvalidThetaInput`] for the first non-finite element.
pub fn validate_theta_input(theta: &Theta) -> OptResult<()> {
    if theta.is_empty() {
        return Err(OptError::ThetaLengthMismatch { expected: 1, actual: 0 });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidThetaInput { index, value });
        }
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate and unwrap an estimated parameter vector (`theta_hat`).
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if no vector was provided.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    match theta_hat {
        Some(t) => {
            for (index, &value) in t.iter().enumerate() {
                if !value.is_finite() {
                    return Err(OptError::InvalidThetaHat {
                        index,
                        value,
                        reason: "Parameter estimates must be finite.",
                    });
                }
            }
            Ok(t)
        }
        None => Err(OptError::MissingThetaHat),
    }
}

/// Validate that a scalar cost value is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // Tolerances accept `None` and positive finite values and reject the rest.
    fn tolerance_checks_accept_and_reject_expected_values() {
        assert!(verify_tol_grad(None).is_ok());
        assert!(verify_tol_grad(Some(1e-5)).is_ok());
        assert!(matches!(verify_tol_grad(Some(0.0)), Err(OptError::InvalidTolGrad { .. })));
        assert!(matches!(
            verify_tol_cost(Some(f64::INFINITY)),
            Err(OptError::InvalidTolCost { .. })
        ));
        assert!(matches!(verify_tol_cost(Some(-1.0)), Err(OptError::InvalidTolCost { .. })));
    }

    #[test]
    // Purpose
    // -------
    // `validate_grad` reports the first non-finite entry and length mismatches.
    fn validate_grad_reports_dimension_and_finiteness() {
        let grad = array![1.0, f64::NAN, f64::INFINITY];

        let dim_err = validate_grad(&grad, 2).unwrap_err();
        let nan_err = validate_grad(&grad, 3).unwrap_err();

        assert_eq!(dim_err, OptError::GradientDimMismatch { expected: 2, found: 3 });
        match nan_err {
            OptError::InvalidGradient { index, .. } => assert_eq!(index, 1),
            other => panic!("Expected InvalidGradient, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Starting points must be non-empty and finite.
    fn validate_theta_input_rejects_empty_and_non_finite() {
        let empty: Theta = Theta::zeros(0);
        let bad = array![0.0, f64::NEG_INFINITY];

        assert!(matches!(
            validate_theta_input(&empty),
            Err(OptError::ThetaLengthMismatch { actual: 0, .. })
        ));
        assert!(matches!(
            validate_theta_input(&bad),
            Err(OptError::InvalidThetaInput { index: 1, .. })
        ));
        assert!(validate_theta_input(&array![0.5, -2.0]).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // `validate_theta_hat` requires a present, finite vector.
    fn validate_theta_hat_requires_present_finite_vector() {
        assert_eq!(validate_theta_hat(None).unwrap_err(), OptError::MissingThetaHat);
        assert!(validate_theta_hat(Some(array![f64::NAN])).is_err());
        assert_eq!(validate_theta_hat(Some(array![1.0, 2.0])).unwrap(), array![1.0, 2.0]);
        assert!(validate_value(-3.5).is_ok());
        assert!(validate_value(f64::NAN).is_err());
    }
}
