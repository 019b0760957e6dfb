//! Subcommand implementations

use scicalc::config::CalculatorConfig;
use scicalc::core::evaluator::Evaluator;
use scicalc::core::{EvalError, Notification};
use scicalc::keypad::{key_to_action, KeypadAction};
use scicalc::session::CalculatorSession;
use serde::Serialize;
use tracing::{debug, info};

use crate::commands::{EvalArgs, KeysArgs};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;

/// Result of evaluating one command-line expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalOutcome {
    /// Expression as given
    pub expression: String,
    /// Formatted result or the evaluation error
    pub result: Result<String, EvalError>,
}

#[derive(Serialize)]
struct EvalRecord<'a> {
    expression: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Evaluates each expression independently
#[must_use]
pub fn evaluate_all(config: &CalculatorConfig, expressions: &[String]) -> Vec<EvalOutcome> {
    let evaluator = Evaluator::with_precision(config.precision);
    expressions
        .iter()
        .map(|expression| EvalOutcome {
            expression: expression.clone(),
            result: evaluator.evaluate(expression),
        })
        .collect()
}

/// Renders outcomes as a JSON array of `{expression, result | error}`
pub fn render_eval_json(outcomes: &[EvalOutcome]) -> CliResult<String> {
    let records: Vec<EvalRecord<'_>> = outcomes
        .iter()
        .map(|outcome| match &outcome.result {
            Ok(result) => EvalRecord {
                expression: &outcome.expression,
                result: Some(result),
                error: None,
            },
            Err(err) => EvalRecord {
                expression: &outcome.expression,
                result: None,
                error: Some(err.to_string()),
            },
        })
        .collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// `scicalc eval`
pub fn run_eval(config: &CliConfig, args: &EvalArgs) -> CliResult<()> {
    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    let outcomes = evaluate_all(&config.calculator, &args.expressions);
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    info!(total = outcomes.len(), failed, "evaluated expressions");

    if args.json {
        println!("{}", render_eval_json(&outcomes)?);
    } else {
        for outcome in &outcomes {
            match &outcome.result {
                Ok(result) => println!("{result}"),
                Err(err) => reporter.failure(&format!("{}: {err}", outcome.expression)),
            }
        }
    }

    if failed > 0 {
        return Err(CliError::evaluation(failed, outcomes.len()));
    }
    Ok(())
}

/// Maps one character of a key sequence; `None` for skipped whitespace
fn key_action(key: char) -> Option<Option<KeypadAction>> {
    match key {
        ' ' => None,
        'b' => Some(Some(KeypadAction::Delete)),
        'c' => Some(Some(KeypadAction::Clear)),
        other => Some(key_to_action(other.encode_utf8(&mut [0; 4]))),
    }
}

/// Feeds a key sequence through a fresh session
pub fn replay_keys(config: &CalculatorConfig, sequence: &str) -> CliResult<CalculatorSession> {
    let mut session = CalculatorSession::with_config(config);
    for (position, key) in sequence.chars().enumerate() {
        let Some(action) = key_action(key) else {
            continue;
        };
        let action = action.ok_or(CliError::unknown_key(key, position))?;
        debug!(?action, "key");
        session.apply(action);
    }
    Ok(session)
}

#[derive(Serialize)]
struct KeysReport<'a> {
    expression: &'a str,
    shown: &'a str,
    history: serde_json::Value,
    notifications: &'a [Notification],
}

/// Renders the session display, history and notifications as JSON
pub fn render_keys_json(
    session: &CalculatorSession,
    notifications: &[Notification],
) -> CliResult<String> {
    let report = KeysReport {
        expression: session.expression_text(),
        shown: session.shown_text(),
        history: session.history().to_json()?,
        notifications,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// `scicalc keys`
pub fn run_keys(config: &CliConfig, args: &KeysArgs) -> CliResult<()> {
    let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
    let mut session = replay_keys(&config.calculator, &args.sequence)?;
    let notifications = session.take_notifications();

    if args.json {
        println!("{}", render_keys_json(&session, &notifications)?);
        return Ok(());
    }

    for notification in &notifications {
        reporter.notification(notification);
    }
    println!("{}", session.expression_text());
    println!("{}", session.shown_text());
    Ok(())
}

/// `scicalc tui`
pub fn run_tui(config: &CliConfig) -> CliResult<()> {
    scicalc::tui::run(&config.calculator)?;
    Ok(())
}
