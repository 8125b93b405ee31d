//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
///
/// Calculation failures are not errors here: they are reported inside the
/// response envelope. These are the problems that prevent a response.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file could not be read.
    #[error("Cannot read {path}: {source}")]
    ReadInput {
        /// File that failed.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Batch input is not a JSON array.
    #[error("Invalid batch input: {0}")]
    InvalidBatch(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
