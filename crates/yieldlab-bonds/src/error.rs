//! Error types for bond operations.

use thiserror::Error;

use yieldlab_core::CoreError;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur while building schedules, pricing, or solving.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Bond terms, feature schedules, or settlement are invalid.
    #[error("Validation failed: {reason}")]
    Validation {
        /// Description of what's invalid.
        reason: String,
    },

    /// The cash-flow schedule cannot be built or is inconsistent.
    #[error("Schedule error: {reason}")]
    Schedule {
        /// Description of the failure.
        reason: String,
    },

    /// No yield reproduces the requested price.
    #[error("No solution: {reason}")]
    NoSolution {
        /// Description of the failure.
        reason: String,
    },

    /// Date or day count error from the core crate.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl BondError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation {
            reason: reason.into(),
        }
    }

    /// Creates a schedule error.
    #[must_use]
    pub fn schedule(reason: impl Into<String>) -> Self {
        Self::Schedule {
            reason: reason.into(),
        }
    }

    /// Creates a no-solution error.
    #[must_use]
    pub fn no_solution(reason: impl Into<String>) -> Self {
        Self::NoSolution {
            reason: reason.into(),
        }
    }

    /// Creates a validation error for a missing builder field.
    #[must_use]
    pub fn missing_field(field: &str) -> Self {
        Self::validation(format!("missing required field: {field}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yieldlab_core::Date;

    #[test]
    fn test_display() {
        let err = BondError::schedule("amortization exceeds face");
        assert_eq!(err.to_string(), "Schedule error: amortization exceeds face");
        assert_eq!(
            BondError::missing_field("issuer").to_string(),
            "Validation failed: missing required field: issuer"
        );
    }

    #[test]
    fn test_core_error_is_transparent() {
        let start = Date::from_ymd(2025, 6, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();
        let err: BondError = CoreError::date_range(start, end).into();
        assert!(err.to_string().contains("2025-06-01"));
        assert!(matches!(err, BondError::Core(CoreError::DateRange { .. })));
    }
}
