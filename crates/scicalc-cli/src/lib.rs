//! scicalc command-line front end
//!
//! Hosts the interactive terminal calculator and two batch commands:
//! `eval` for expressions and `keys` for replaying button presses.

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{Cli, ColorArg, Commands, EvalArgs, KeysArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use logging::LogTarget;
pub use output::Reporter;
