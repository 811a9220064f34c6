use argmin::core::{ArgminError, Error};

use crate::metric_learning::errors::NcaError;

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Gradient dimensions do not match parameter dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- OptimizerOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    /// Invalid line searcher name.
    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },

    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },

    // ---- Cost function ----
    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    // ---- Optimizer input / outcome ----
    /// Initial or intermediate parameter vector has the wrong length.
    ThetaLengthMismatch {
        expected: usize,
        actual: usize,
    },

    /// Parameter vector length must be a positive multiple of `factor`.
    ThetaLengthNotMultiple {
        factor: usize,
        actual: usize,
    },

    /// Optimizer input must have finite values.
    InvalidThetaInput {
        index: usize,
        value: f64,
    },

    /// Estimated parameters must be finite.
    InvalidThetaHat {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// Theta hat is missing
    MissingThetaHat,

    // ---- Objective ----
    /// Objective evaluation failed for a model-specific reason.
    ObjectiveFailed {
        text: String,
    },

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl OptError {
    /// `true` when the error originated inside the solver (line search,
    /// internal conditions) or at a point the solver proposed that produced
    /// non-finite values, rather than in the objective or configuration.
    ///
    /// Model layers use this to keep the best point seen so far instead of
    /// discarding the whole run.
    pub fn is_solver_failure(&self) -> bool {
        matches!(
            self,
            OptError::NonFiniteCost { .. }
                | OptError::InvalidGradient { .. }
                | OptError::InvalidParameter { .. }
                | OptError::NotImplemented { .. }
                | OptError::NotInitialized { .. }
                | OptError::ConditionViolated { .. }
                | OptError::CheckPointNotFound { .. }
                | OptError::PotentialBug { .. }
                | OptError::ImpossibleError { .. }
                | OptError::BackendError { .. }
                | OptError::UnknownError
        )
    }
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Gradient optimization not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- OptimizerOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Invalid line searcher '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }

            // ---- Optimizer input / outcome ----
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, actual {actual}")
            }
            OptError::ThetaLengthNotMultiple { factor, actual } => {
                write!(f, "Theta length {actual} is not a positive multiple of {factor}")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Invalid theta input at index {index}: {value}, must be finite")
            }
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Invalid estimated parameter at index {index}: {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Missing estimated parameters (theta hat)")
            }

            // ---- Objective ----
            OptError::ObjectiveFailed { text } => {
                write!(f, "Objective evaluation failed: {text}")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        // Objective errors travel through argmin wrapped in its `Error`;
        // recover them first so callers see the original variant.
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<NcaError> for OptError {
    fn from(err: NcaError) -> Self {
        match err {
            NcaError::TransformLengthMismatch { n_features, actual } => {
                OptError::ThetaLengthNotMultiple { factor: n_features, actual }
            }
            other => OptError::ObjectiveFailed { text: other.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Recovery of `OptError` values that were tunneled through argmin's
    //   `Error`.
    // - Mapping of `ArgminError` variants and foreign errors.
    // - Classification via `is_solver_failure`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // An `OptError` converted into argmin's `Error` must come back unchanged.
    //
    // Given
    // -----
    // - `OptError::ThetaLengthMismatch` boxed into `Error`.
    //
    // Expect
    // ------
    // - `OptError::from` yields the identical variant.
    fn from_error_recovers_tunneled_opt_error() {
        // Arrange
        let original = OptError::ThetaLengthMismatch { expected: 3, actual: 4 };
        let boxed: Error = original.clone().into();

        // Act
        let recovered = OptError::from(boxed);

        // Assert
        assert_eq!(recovered, original);
        assert!(!recovered.is_solver_failure());
    }

    #[test]
    // Purpose
    // -------
    // Argmin condition violations (typical line-search aborts) map onto
    // `ConditionViolated` and count as solver failures.
    //
    // Given
    // -----
    // - `ArgminError::ConditionViolated` boxed into `Error`.
    //
    // Expect
    // ------
    // - `OptError::ConditionViolated` with the same text.
    // - `is_solver_failure()` is true.
    fn from_error_maps_argmin_condition_violated() {
        // Arrange
        let boxed: Error =
            ArgminError::ConditionViolated { text: "descent direction".to_string() }.into();

        // Act
        let mapped = OptError::from(boxed);

        // Assert
        assert_eq!(mapped, OptError::ConditionViolated { text: "descent direction".to_string() });
        assert!(mapped.is_solver_failure());
    }

    #[test]
    // Purpose
    // -------
    // A flattened transform whose length is not a multiple of d is reported
    // as such, without claiming one specific expected length.
    //
    // Given
    // -----
    // - `NcaError::TransformLengthMismatch { n_features: 3, actual: 7 }`.
    //
    // Expect
    // ------
    // - `OptError::ThetaLengthNotMultiple { factor: 3, actual: 7 }`.
    // - The message names the multiple rule, not an expected length.
    fn from_nca_error_maps_length_mismatch() {
        // Arrange
        let err = NcaError::TransformLengthMismatch { n_features: 3, actual: 7 };

        // Act
        let mapped = OptError::from(err);

        // Assert
        assert_eq!(mapped, OptError::ThetaLengthNotMultiple { factor: 3, actual: 7 });
        assert_eq!(mapped.to_string(), "Theta length 7 is not a positive multiple of 3");
        assert!(!mapped.is_solver_failure());
    }
}
