//! `tracing` subscriber setup

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Where the subscriber writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Batch commands: stderr, or the log file when given
    Batch,
    /// Interactive calculator: the log file only
    Interactive,
}

/// Builds the filter: `RUST_LOG` wins, else the verbosity level
#[must_use]
pub fn build_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_directive()))
}

/// Installs the global subscriber for `target`
///
/// The interactive calculator owns the screen, so without a log file it
/// installs nothing.
pub fn init(config: &CliConfig, target: LogTarget) -> CliResult<()> {
    match (&config.log_file, target) {
        (Some(path), _) => init_file(config, path),
        (None, LogTarget::Batch) => init_stderr(config),
        (None, LogTarget::Interactive) => Ok(()),
    }
}

fn init_stderr(config: &CliConfig) -> CliResult<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_writer(std::io::stderr)
        .with_target(false);
    let result = if config.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| CliError::logging(e.to_string()))
}

fn init_file(config: &CliConfig, path: &Path) -> CliResult<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_writer(Mutex::new(file))
        .with_ansi(false);
    let result = if config.log_json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| CliError::logging(e.to_string()))
}
