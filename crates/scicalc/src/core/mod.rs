//! Calculator core: builder, evaluator, memory register, history and formatter
//!
//! Every operation here is synchronous and total. Failures are reported as
//! values ([`EvalError`], [`MemoryError`]) and never abort a session.

pub mod builder;
pub mod evaluator;
pub mod format;
pub mod history;
pub mod memory;
mod operations;
pub mod parser;

pub use operations::{Calculator, Constant, Function, Operation};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Display value shown after a failed evaluation
pub const ERROR_SENTINEL: &str = "Error";

/// Operand text shown when nothing has been typed yet
pub const ZERO: &str = "0";

/// Result type for expression evaluation
pub type EvalResult<T> = Result<T, EvalError>;

/// Result type for memory register operations
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Expression evaluation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Malformed expression: unbalanced parentheses, unknown token, dangling operator
    #[error("Invalid expression: {0}")]
    ParseError(String),
    /// The expression evaluated to NaN or an infinity
    #[error("Invalid result: {0}")]
    InvalidResult(String),
}

impl EvalError {
    /// Creates a parse error
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseError(message.into())
    }

    /// Creates an invalid-result error
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidResult(message.into())
    }
}

/// Memory register errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// Recall or subtract on an empty register
    #[error("No value stored in memory")]
    Empty,
    /// The current value is not a finite number
    #[error("Invalid memory value: {0}")]
    InvalidValue(String),
}

/// The two text buffers a calculator display shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayState {
    /// Current operand or result, shown large
    pub shown_text: String,
    /// Full accumulated formula, shown small
    pub expression_text: String,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayState {
    /// Initial state: `{"0", ""}`
    #[must_use]
    pub fn new() -> Self {
        Self {
            shown_text: ZERO.to_string(),
            expression_text: String::new(),
        }
    }

    /// Both buffers set to the same text (evaluation result, history replay)
    #[must_use]
    pub fn seeded(text: &str) -> Self {
        let shown_text = if text.is_empty() { ZERO } else { text };
        Self {
            shown_text: shown_text.to_string(),
            expression_text: text.to_string(),
        }
    }

    /// Returns true if the display shows the error sentinel
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.shown_text == ERROR_SENTINEL
    }
}

/// Severity of a [`Notification`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Informational status
    Info,
    /// Something the user asked for could not be done
    Error,
}

/// Status message emitted towards the input surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Severity
    pub kind: NotificationKind,
    /// Short headline
    pub title: String,
    /// One-line description
    pub detail: String,
}

impl Notification {
    /// Creates an informational notification
    #[must_use]
    pub fn info(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            title: title.into(),
            detail: detail.into(),
        }
    }

    /// Creates an error notification
    #[must_use]
    pub fn error(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            detail: detail.into(),
        }
    }

    /// Returns true for error notifications
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, NotificationKind::Error)
    }
}
