//! Engine error types and the machine-readable error taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use yieldlab_bonds::BondError;
use yieldlab_core::{CoreError, Date};

/// A specialized Result type for engine operations.
pub type EngineResult<T> = Result<T, AnalyticsError>;

/// Machine-readable error kind reported in the error envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed or out-of-range terms, features, settlement or settings
    ValidationError,
    /// A period requested with its start after its end
    DateRangeError,
    /// Inconsistent cash-flow schedule
    ScheduleError,
    /// Zero or several locked inputs
    AmbiguousInputError,
    /// The solver cannot bracket or converge
    NoSolutionError,
}

impl ErrorKind {
    /// Wire name of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ValidationError => "ValidationError",
            ErrorKind::DateRangeError => "DateRangeError",
            ErrorKind::ScheduleError => "ScheduleError",
            ErrorKind::AmbiguousInputError => "AmbiguousInputError",
            ErrorKind::NoSolutionError => "NoSolutionError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by the analytics façade.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    /// Invalid request, terms or features.
    #[error("Validation failed: {reason}")]
    Validation {
        /// Description of what's invalid.
        reason: String,
    },

    /// A period was requested with its start after its end.
    #[error("Invalid date range: {start} is after {end}")]
    DateRange {
        /// Start of the requested period.
        start: Date,
        /// End of the requested period.
        end: Date,
    },

    /// The cash-flow schedule is inconsistent.
    #[error("Schedule error: {reason}")]
    Schedule {
        /// Description of the failure.
        reason: String,
    },

    /// The request does not lock exactly one of price, yield and spread.
    #[error("Ambiguous input: {reason}")]
    AmbiguousInput {
        /// Description of the locked fields found.
        reason: String,
    },

    /// No yield reproduces the requested price.
    #[error("No solution: {reason}")]
    NoSolution {
        /// Description of the failure.
        reason: String,
    },

    /// Engine settings failed validation.
    #[error("Invalid configuration: {}", join_issues(.issues))]
    Config {
        /// Every rule the settings break.
        issues: Vec<ConfigIssue>,
    },

    /// Engine settings could not be read or parsed.
    #[error("Cannot load configuration {source_name}: {message}")]
    ConfigLoad {
        /// File path or other origin of the settings.
        source_name: String,
        /// Underlying I/O or parse error.
        message: String,
    },
}

impl AnalyticsError {
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

    /// Creates an ambiguous input error.
    #[must_use]
    pub fn ambiguous(reason: impl Into<String>) -> Self {
        Self::AmbiguousInput {
            reason: reason.into(),
        }
    }

    /// Creates a configuration load error.
    #[must_use]
    pub fn config_load(source_name: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::ConfigLoad {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }

    /// Kind reported on the wire. Configuration problems are validation
    /// failures of the engine's own inputs.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } | Self::Config { .. } | Self::ConfigLoad { .. } => {
                ErrorKind::ValidationError
            }
            Self::DateRange { .. } => ErrorKind::DateRangeError,
            Self::Schedule { .. } => ErrorKind::ScheduleError,
            Self::AmbiguousInput { .. } => ErrorKind::AmbiguousInputError,
            Self::NoSolution { .. } => ErrorKind::NoSolutionError,
        }
    }
}

impl From<CoreError> for AnalyticsError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DateRange { start, end } => Self::DateRange { start, end },
            other => Self::validation(other.to_string()),
        }
    }
}

impl From<BondError> for AnalyticsError {
    fn from(err: BondError) -> Self {
        match err {
            BondError::Validation { reason } => Self::Validation { reason },
            BondError::Schedule { reason } => Self::Schedule { reason },
            BondError::NoSolution { reason } => Self::NoSolution { reason },
            BondError::Core(core) => core.into(),
        }
    }
}

impl From<serde_json::Error> for AnalyticsError {
    fn from(err: serde_json::Error) -> Self {
        Self::validation(format!("malformed request: {err}"))
    }
}

/// A single broken configuration rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    /// Setting that failed validation.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl ConfigIssue {
    /// Creates a configuration issue.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bond_errors_keep_their_kind() {
        let cases = [
            (BondError::validation("x"), ErrorKind::ValidationError),
            (BondError::schedule("x"), ErrorKind::ScheduleError),
            (BondError::no_solution("x"), ErrorKind::NoSolutionError),
        ];
        for (err, kind) in cases {
            assert_eq!(AnalyticsError::from(err).kind(), kind);
        }
    }

    #[test]
    fn test_core_date_range_maps_to_date_range_kind() {
        let a = Date::from_ymd(2025, 6, 1).unwrap();
        let b = Date::from_ymd(2025, 1, 1).unwrap();
        let err: AnalyticsError = BondError::from(CoreError::date_range(a, b)).into();
        assert_eq!(err.kind(), ErrorKind::DateRangeError);
        assert_eq!(err.to_string(), "Invalid date range: 2025-06-01 is after 2025-01-01");

        let err: AnalyticsError = CoreError::invalid_date("2025-02-30").into();
        assert_eq!(err.kind(), ErrorKind::ValidationError);
    }

    #[test]
    fn test_config_issues_are_joined() {
        let err = AnalyticsError::Config {
            issues: vec![
                ConfigIssue::new("price_tolerance", "must be positive"),
                ConfigIssue::new("max_clamp_hits", "must be at least 1"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration: price_tolerance: must be positive; max_clamp_hits: must be at least 1"
        );
        assert_eq!(err.kind(), ErrorKind::ValidationError);
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&ErrorKind::AmbiguousInputError).unwrap(),
            "\"AmbiguousInputError\""
        );
        assert_eq!(ErrorKind::NoSolutionError.to_string(), "NoSolutionError");
    }
}
