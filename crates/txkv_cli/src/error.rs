//! CLI error types.

use std::io;
use thiserror::Error;
use txkv_core::StoreError;

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Errors raised while running CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// I/O error reading a script or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON encoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A script line could not be parsed.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// The store rejected a command.
    #[error("line {line}: {source}")]
    Store {
        /// 1-based line number.
        line: usize,
        /// The store error.
        source: StoreError,
    },

    /// Unknown output format.
    #[error("unknown output format: {0} (expected text or json)")]
    UnknownFormat(String),
}

impl CliError {
    /// Creates a parse error.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}
