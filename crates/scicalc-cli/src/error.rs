//! Error types for the CLI

use scicalc::config::ConfigError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Calculator configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// One or more expressions failed to evaluate
    #[error("{failed} of {total} expression(s) failed to evaluate")]
    Evaluation {
        /// Number of failed expressions
        failed: usize,
        /// Number of expressions given
        total: usize,
    },

    /// Key sequence contains a character with no keypad action
    #[error("Unknown key '{key}' at position {position}")]
    UnknownKey {
        /// The offending character
        key: char,
        /// Character index in the sequence
        position: usize,
    },

    /// Logging could not be initialized
    #[error("Logging setup failed: {message}")]
    Logging {
        /// Error message
        message: String,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create an evaluation failure summary
    #[must_use]
    pub const fn evaluation(failed: usize, total: usize) -> Self {
        Self::Evaluation { failed, total }
    }

    /// Create an unknown key error
    #[must_use]
    pub const fn unknown_key(key: char, position: usize) -> Self {
        Self::UnknownKey { key, position }
    }

    /// Create a logging error
    #[must_use]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}
