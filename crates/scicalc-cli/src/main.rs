//! scicalc: scientific calculator
//!
//! ## Usage
//!
//! ```bash
//! scicalc                          # Interactive keypad
//! scicalc eval "2+3*4" "sin(π/2)"  # Batch evaluation
//! scicalc keys "12+3="             # Replay button presses
//! ```

use clap::Parser;
use scicalc::config::CalculatorConfig;
use scicalc_cli::{
    handlers, logging, Cli, CliConfig, CliResult, ColorChoice, Commands, LogTarget, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;

    let target = match cli.command {
        None | Some(Commands::Tui) => LogTarget::Interactive,
        Some(_) => LogTarget::Batch,
    };
    logging::init(&config, target)?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command {
        None | Some(Commands::Tui) => handlers::run_tui(&config),
        Some(Commands::Eval(args)) => handlers::run_eval(&config, &args),
        Some(Commands::Keys(args)) => handlers::run_keys(&config, &args),
    }
}

fn build_config(cli: &Cli) -> CliResult<CliConfig> {
    let verbosity = if cli.quiet {
        Verbosity::Quiet
    } else {
        match cli.verbose {
            0 => Verbosity::Normal,
            1 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    };

    let color: ColorChoice = cli.color.clone().into();

    let calculator = match &cli.config {
        Some(path) => CalculatorConfig::load(path)?,
        None => CalculatorConfig::default(),
    };

    Ok(CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_calculator(calculator)
        .with_log_file(cli.log_file.clone())
        .with_log_json(cli.log_json))
}
