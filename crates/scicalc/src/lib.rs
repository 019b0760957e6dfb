//! Scientific calculator engine
//!
//! A keypad-driven calculator: button presses build an infix expression,
//! a safe recursive-descent evaluator computes it, and the session keeps a
//! memory register and a bounded history of results.
//!
//! # Layers
//!
//! - [`core`]: expression builder, parser, evaluator, memory and history
//! - [`keypad`]: button actions, keyboard mapping and keypad grids
//! - [`session`]: one calculator instance wiring the pieces together
//! - [`driver`]: a uniform driver trait for scripted checks
//! - `tui`: the terminal frontend (feature `tui`)
//!
//! # Example
//!
//! ```rust
//! use scicalc::prelude::*;
//!
//! let evaluator = Evaluator::new();
//! assert_eq!(evaluator.evaluate("2+3*4").unwrap(), "14");
//! assert_eq!(evaluator.evaluate("sin(π/2)").unwrap(), "1");
//!
//! let mut session = CalculatorSession::new();
//! session.apply_all([
//!     KeypadAction::Digit(6),
//!     KeypadAction::Operator(Operation::Multiply),
//!     KeypadAction::Digit(7),
//!     KeypadAction::Equals,
//! ]);
//! assert_eq!(session.shown_text(), "42");
//! assert_eq!(session.history().latest().unwrap().display(), "6*7 = 42");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![warn(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod keypad;
pub mod session;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{CalculatorConfig, ConfigError};
    pub use crate::core::builder::ExpressionBuilder;
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::memory::MemoryRegister;
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{
        Calculator, Constant, DisplayState, EvalError, EvalResult, Function, MemoryError,
        MemoryResult, Notification, NotificationKind, Operation,
    };
    pub use crate::driver::CalculatorDriver;
    pub use crate::keypad::{key_to_action, Keypad, KeypadAction};
    pub use crate::session::{CalculatorSession, ModeFlags};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}
