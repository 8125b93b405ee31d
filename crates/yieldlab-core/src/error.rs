//! Error types for date and day count operations.

use thiserror::Error;

use crate::types::Date;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the date and day count layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A calendar date could not be constructed or parsed.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A period was requested with its start after its end.
    #[error("Invalid date range: {start} is after {end}")]
    DateRange {
        /// Start of the requested period.
        start: Date,
        /// End of the requested period.
        end: Date,
    },

    /// Payment frequency that does not divide the year into whole months.
    #[error("Unsupported payment frequency: {value} (expected 1, 2, 3, 4, 6 or 12)")]
    InvalidFrequency {
        /// The rejected periods-per-year value.
        value: u32,
    },

    /// Unknown day count convention name.
    #[error("Unknown day count convention: {name}")]
    UnknownDayCount {
        /// The rejected convention name.
        name: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a date range error.
    #[must_use]
    pub fn date_range(start: Date, end: Date) -> Self {
        Self::DateRange { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_date_range_display() {
        let start = Date::from_ymd(2025, 6, 1).unwrap();
        let end = Date::from_ymd(2025, 1, 1).unwrap();
        let err = CoreError::date_range(start, end);
        assert_eq!(
            err.to_string(),
            "Invalid date range: 2025-06-01 is after 2025-01-01"
        );
    }
}
