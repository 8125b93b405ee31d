//! Error types for numerical routines.

use thiserror::Error;

/// A specialized Result type for numerical routines.
pub type MathResult<T> = Result<T, MathError>;

/// Errors raised by the root finders.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Iteration budget exhausted.
    #[error("Convergence failed after {iterations} iterations (residual: {residual:.2e})")]
    ConvergenceFailed {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final absolute residual.
        residual: f64,
    },

    /// Bracket endpoints do not straddle a root.
    #[error("Invalid bracket: f({a}) = {fa:.2e} and f({b}) = {fb:.2e} have same sign")]
    InvalidBracket {
        /// Lower bound of bracket.
        a: f64,
        /// Upper bound of bracket.
        b: f64,
        /// Function value at a.
        fa: f64,
        /// Function value at b.
        fb: f64,
    },

    /// Derivative too small to take a Newton step.
    #[error("Derivative underflow after {iterations} iterations: {value:.2e}")]
    DerivativeUnderflow {
        /// Iterations completed before the failure.
        iterations: u32,
        /// The near-zero derivative.
        value: f64,
    },

    /// Newton kept landing on the domain boundary.
    #[error("Iterate pinned to bound {bound} after {iterations} iterations")]
    BoundaryStuck {
        /// Iterations completed before the failure.
        iterations: u32,
        /// The bound that was hit.
        bound: f64,
    },

    /// Function, derivative, or iterate became NaN or infinite.
    #[error("Non-finite value after {iterations} iterations")]
    NonFinite {
        /// Iterations completed before the failure.
        iterations: u32,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl MathError {
    /// Creates a convergence failed error.
    #[must_use]
    pub fn convergence_failed(iterations: u32, residual: f64) -> Self {
        Self::ConvergenceFailed {
            iterations,
            residual,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Iterations spent before the failure, where tracked.
    #[must_use]
    pub fn iterations(&self) -> u32 {
        match self {
            Self::ConvergenceFailed { iterations, .. }
            | Self::DerivativeUnderflow { iterations, .. }
            | Self::BoundaryStuck { iterations, .. }
            | Self::NonFinite { iterations } => *iterations,
            Self::InvalidBracket { .. } | Self::InvalidInput { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MathError::convergence_failed(50, 1e-6);
        assert!(err.to_string().contains("50 iterations"));
    }

    #[test]
    fn test_iterations_tracked() {
        let err = MathError::BoundaryStuck {
            iterations: 4,
            bound: -0.99,
        };
        assert_eq!(err.iterations(), 4);
        assert_eq!(MathError::invalid_input("x").iterations(), 0);
    }
}
