//! Calculator session: one builder, evaluator, memory register and history
//!
//! The session turns keypad actions into state changes and queues the
//! notifications an input surface should show. Failures never escape as
//! panics; they end up as the `"Error"` operand or a notification.

use tracing::{debug, warn};

use crate::config::CalculatorConfig;
use crate::core::builder::ExpressionBuilder;
use crate::core::evaluator::Evaluator;
use crate::core::format::{format_with_precision, parse_display_number};
use crate::core::history::History;
use crate::core::memory::MemoryRegister;
use crate::core::{DisplayState, EvalResult, MemoryError, MemoryResult, Notification};
use crate::keypad::KeypadAction;

/// Presentation toggles consumed by the input surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeFlags {
    /// History panel visible
    pub show_history: bool,
    /// Scientific keypad visible
    pub show_scientific: bool,
}

/// A live calculator
#[derive(Debug, Clone)]
pub struct CalculatorSession {
    builder: ExpressionBuilder,
    evaluator: Evaluator,
    memory: MemoryRegister,
    history: History,
    modes: ModeFlags,
    notifications: Vec<Notification>,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorSession {
    /// Creates a session with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&CalculatorConfig::default())
    }

    /// Creates a session from a configuration
    #[must_use]
    pub fn with_config(config: &CalculatorConfig) -> Self {
        Self {
            builder: ExpressionBuilder::new(),
            evaluator: Evaluator::with_precision(config.precision),
            memory: MemoryRegister::new(),
            history: History::with_capacity(config.history_capacity),
            modes: ModeFlags::default(),
            notifications: Vec::new(),
        }
    }

    // ===== Accessors =====

    /// Returns the display state
    #[must_use]
    pub fn state(&self) -> &DisplayState {
        self.builder.state()
    }

    /// Returns the current operand text
    #[must_use]
    pub fn shown_text(&self) -> &str {
        self.builder.shown_text()
    }

    /// Returns the accumulated expression
    #[must_use]
    pub fn expression_text(&self) -> &str {
        self.builder.expression_text()
    }

    /// Returns the calculation history
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns the memory register
    #[must_use]
    pub fn memory(&self) -> &MemoryRegister {
        &self.memory
    }

    /// Returns the mode flags
    #[must_use]
    pub fn modes(&self) -> ModeFlags {
        self.modes
    }

    /// Returns queued notifications without draining them
    #[must_use]
    pub fn pending_notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Drains queued notifications, oldest first
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // ===== Dispatch =====

    /// Applies one keypad action
    pub fn apply(&mut self, action: KeypadAction) {
        debug!(?action, "keypad action");
        match action {
            KeypadAction::Digit(d) if d <= 9 => self.builder.append_digit(char::from(b'0' + d)),
            KeypadAction::Digit(_) => {}
            KeypadAction::Decimal => self.builder.append_decimal_point(),
            KeypadAction::Operator(op) => self.builder.apply_operator(op),
            KeypadAction::Function(func) => self.builder.apply_function_prefix(func),
            KeypadAction::Square => self.builder.apply_postfix_power(2),
            KeypadAction::Cube => self.builder.apply_postfix_power(3),
            KeypadAction::Constant(c) => self.builder.insert_constant(c),
            KeypadAction::OpenParen => self.builder.append_parenthesis('('),
            KeypadAction::CloseParen => self.builder.append_parenthesis(')'),
            KeypadAction::Negate => self.builder.negate_current(),
            KeypadAction::Delete => self.builder.delete_last(),
            KeypadAction::Clear => self.builder.clear(),
            KeypadAction::Equals => {
                let _ = self.evaluate();
            }
            KeypadAction::MemoryClear => self.memory_clear(),
            KeypadAction::MemoryRecall => {
                let _ = self.memory_recall();
            }
            KeypadAction::MemoryStore => {
                let _ = self.memory_store();
            }
            KeypadAction::MemoryAdd => {
                let _ = self.memory_add();
            }
            KeypadAction::MemorySubtract => {
                let _ = self.memory_subtract();
            }
            KeypadAction::ToggleHistory => self.toggle_history(),
            KeypadAction::ToggleScientific => self.toggle_scientific(),
        }
    }

    /// Applies a sequence of actions in order
    pub fn apply_all(&mut self, actions: impl IntoIterator<Item = KeypadAction>) {
        for action in actions {
            self.apply(action);
        }
    }

    // ===== Evaluation =====

    /// Evaluates the expression
    ///
    /// On success both texts become the formatted result and the calculation
    /// is recorded. On failure the operand shows `"Error"`, the expression is
    /// kept and an error notification is queued.
    pub fn evaluate(&mut self) -> EvalResult<String> {
        let expression = self.builder.expression_text().to_string();
        match self.evaluator.evaluate(&expression) {
            Ok(result) => {
                self.history.append(&expression, &result);
                self.builder.seed(&result);
                Ok(result)
            }
            Err(e) => {
                warn!(expression = %expression, error = %e, "evaluation failed");
                self.builder.show_error();
                self.notify(Notification::error(
                    "Calculation Error",
                    "Invalid mathematical expression",
                ));
                Err(e)
            }
        }
    }

    // ===== Memory =====

    /// MS: stores the operand
    pub fn memory_store(&mut self) -> MemoryResult<f64> {
        let stored = self.operand_value().and_then(|v| self.memory.store(v));
        match stored {
            Ok(value) => self.notify(Notification::info(
                "Memory Stored",
                format!("Value {} stored in memory", self.format(value)),
            )),
            Err(_) => self.notify(Notification::error(
                "Memory Error",
                "Could not store value in memory",
            )),
        }
        stored
    }

    /// MR: shows the stored value and appends it to the expression
    pub fn memory_recall(&mut self) -> MemoryResult<f64> {
        let recalled = self.memory.recall();
        match recalled {
            Ok(value) => {
                let text = self.format(value);
                debug!(value, "memory recall");
                self.builder.append_value(&text);
            }
            Err(_) => self.notify_memory_empty(),
        }
        recalled
    }

    /// MC: empties the register
    pub fn memory_clear(&mut self) {
        self.memory.clear();
        self.notify(Notification::info("Memory Cleared", "Memory has been cleared"));
    }

    /// M+: adds the operand, storing it when the register is empty
    pub fn memory_add(&mut self) -> MemoryResult<f64> {
        if self.memory.is_empty() {
            return self.memory_store();
        }
        let operand = self.builder.shown_text().to_string();
        let updated = self.operand_value().and_then(|v| self.memory.add(v));
        match updated {
            Ok(_) => self.notify(Notification::info(
                "Memory Updated",
                format!("Added {operand} to memory"),
            )),
            Err(_) => self.notify(Notification::error("Memory Error", "Could not add to memory")),
        }
        updated
    }

    /// M−: subtracts the operand from the stored value
    pub fn memory_subtract(&mut self) -> MemoryResult<f64> {
        if self.memory.is_empty() {
            self.notify_memory_empty();
            return Err(MemoryError::Empty);
        }
        let operand = self.builder.shown_text().to_string();
        let updated = self.operand_value().and_then(|v| self.memory.subtract(v));
        match updated {
            Ok(_) => self.notify(Notification::info(
                "Memory Updated",
                format!("Subtracted {operand} from memory"),
            )),
            Err(_) => self.notify(Notification::error(
                "Memory Error",
                "Could not subtract from memory",
            )),
        }
        updated
    }

    // ===== History and modes =====

    /// Re-seeds the display from history entry `index` (0 = newest)
    pub fn replay_history(&mut self, index: usize) -> bool {
        match self.history.replay(index) {
            Some(state) => {
                debug!(index, "history replay");
                self.builder = ExpressionBuilder::from_state(state);
                true
            }
            None => false,
        }
    }

    /// Removes every history entry
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Shows or hides the history panel
    pub fn toggle_history(&mut self) {
        self.modes.show_history = !self.modes.show_history;
    }

    /// Shows or hides the scientific keypad
    pub fn toggle_scientific(&mut self) {
        self.modes.show_scientific = !self.modes.show_scientific;
    }

    // ===== Internals =====

    fn operand_value(&self) -> MemoryResult<f64> {
        let shown = self.builder.shown_text();
        parse_display_number(shown).ok_or_else(|| MemoryError::InvalidValue(shown.to_string()))
    }

    fn format(&self, value: f64) -> String {
        format_with_precision(value, self.evaluator.precision())
    }

    fn notify_memory_empty(&mut self) {
        self.notify(Notification::info("Memory Empty", "No value stored in memory"));
    }

    fn notify(&mut self, notification: Notification) {
        debug!(title = %notification.title, detail = %notification.detail, "notification");
        self.notifications.push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Constant, EvalError, Function, NotificationKind, Operation};
    use crate::keypad::key_to_action;

    fn type_keys(session: &mut CalculatorSession, keys: &str) {
        for ch in keys.chars() {
            let action = key_to_action(&ch.to_string()).unwrap();
            session.apply(action);
        }
    }

    fn titles(session: &mut CalculatorSession) -> Vec<String> {
        session
            .take_notifications()
            .into_iter()
            .map(|n| n.title)
            .collect()
    }

    // ===== Evaluation =====

    #[test]
    fn test_new_session_state() {
        let session = CalculatorSession::new();
        assert_eq!(session.state(), &DisplayState::new());
        assert!(session.history().is_empty());
        assert!(session.memory().is_empty());
        assert_eq!(session.modes(), ModeFlags::default());
        assert!(session.pending_notifications().is_empty());
    }

    #[test]
    fn test_evaluate_success_seeds_and_records() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "2+3*4");
        assert_eq!(session.evaluate(), Ok("14".to_string()));
        assert_eq!(session.shown_text(), "14");
        assert_eq!(session.expression_text(), "14");
        let entry = session.history().latest().unwrap();
        assert_eq!(entry.expression, "2+3*4");
        assert_eq!(entry.result, "14");
        assert!(session.pending_notifications().is_empty());
    }

    #[test]
    fn test_evaluate_failure_shows_error() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "7/0");
        assert!(matches!(session.evaluate(), Err(EvalError::InvalidResult(_))));
        assert_eq!(session.shown_text(), "Error");
        assert_eq!(session.expression_text(), "7/0");
        assert!(session.history().is_empty());

        let notes = session.take_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].kind, NotificationKind::Error);
        assert_eq!(notes[0].title, "Calculation Error");
        assert_eq!(notes[0].detail, "Invalid mathematical expression");
        assert!(session.take_notifications().is_empty());
    }

    #[test]
    fn test_equals_on_empty_expression_is_error() {
        let mut session = CalculatorSession::new();
        session.apply(KeypadAction::Equals);
        assert_eq!(session.shown_text(), "Error");
    }

    #[test]
    fn test_continue_from_result() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "2+3=*2=");
        assert_eq!(session.shown_text(), "10");
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_scientific_actions() {
        let mut session = CalculatorSession::new();
        session.apply(KeypadAction::Function(Function::Sqrt));
        type_keys(&mut session, "16)");
        session.apply(KeypadAction::Operator(Operation::Add));
        session.apply(KeypadAction::Digit(3));
        session.apply(KeypadAction::Square);
        assert_eq!(session.expression_text(), "sqrt(16)+3^2");
        assert_eq!(session.evaluate(), Ok("13".to_string()));
    }

    #[test]
    fn test_constant_action() {
        let mut session = CalculatorSession::new();
        session.apply(KeypadAction::Constant(Constant::Pi));
        assert_eq!(session.shown_text(), "π");
        assert_eq!(session.evaluate(), Ok("3.1415926536".to_string()));
    }

    #[test]
    fn test_negate_parenthesized_group() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "(2+3)");
        session.apply(KeypadAction::Negate);
        assert_eq!(session.evaluate(), Ok("-5".to_string()));
    }

    #[test]
    fn test_negate_constant() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "2*");
        session.apply(KeypadAction::Constant(Constant::Pi));
        session.apply(KeypadAction::Negate);
        assert_eq!(session.shown_text(), "-3.1415926536");
        assert_eq!(session.evaluate(), Ok("-6.2831853072".to_string()));
    }

    #[test]
    fn test_custom_precision() {
        let config = CalculatorConfig::new().with_precision(2);
        let mut session = CalculatorSession::with_config(&config);
        type_keys(&mut session, "2/3=");
        assert_eq!(session.shown_text(), "0.67");
    }

    #[test]
    fn test_custom_history_capacity() {
        let config = CalculatorConfig::new().with_history_capacity(2);
        let mut session = CalculatorSession::with_config(&config);
        for expr in ["1+1=", "2+2=", "3+3="] {
            session.apply(KeypadAction::Clear);
            type_keys(&mut session, expr);
        }
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history().latest().unwrap().result, "6");
    }

    #[test]
    fn test_out_of_range_digit_ignored() {
        let mut session = CalculatorSession::new();
        session.apply(KeypadAction::Digit(12));
        assert_eq!(session.state(), &DisplayState::new());
    }

    // ===== Memory =====

    #[test]
    fn test_memory_store_recall_clear() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "5");
        assert_eq!(session.memory_store(), Ok(5.0));
        let notes = session.take_notifications();
        assert_eq!(notes[0].title, "Memory Stored");
        assert_eq!(notes[0].detail, "Value 5 stored in memory");

        session.apply(KeypadAction::Clear);
        type_keys(&mut session, "2+");
        assert_eq!(session.memory_recall(), Ok(5.0));
        assert_eq!(session.shown_text(), "5");
        assert_eq!(session.expression_text(), "2+5");
        assert!(session.take_notifications().is_empty());

        session.memory_clear();
        assert_eq!(titles(&mut session), vec!["Memory Cleared"]);
        assert_eq!(session.memory_recall(), Err(MemoryError::Empty));
        let notes = session.take_notifications();
        assert_eq!(notes[0].title, "Memory Empty");
        assert_eq!(notes[0].kind, NotificationKind::Info);
    }

    #[test]
    fn test_memory_store_constant_operand() {
        let mut session = CalculatorSession::new();
        session.apply(KeypadAction::Constant(Constant::E));
        assert_eq!(session.memory_store(), Ok(std::f64::consts::E));
    }

    #[test]
    fn test_memory_store_error_operand_fails() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "1/0=");
        session.take_notifications();
        assert!(matches!(
            session.memory_store(),
            Err(MemoryError::InvalidValue(_))
        ));
        let notes = session.take_notifications();
        assert_eq!(notes[0].title, "Memory Error");
        assert_eq!(notes[0].detail, "Could not store value in memory");
        assert!(notes[0].is_error());
        assert!(session.memory().is_empty());
    }

    #[test]
    fn test_memory_add_on_empty_stores() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "4");
        assert_eq!(session.memory_add(), Ok(4.0));
        assert_eq!(titles(&mut session), vec!["Memory Stored"]);
    }

    #[test]
    fn test_memory_add_and_subtract() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "10");
        session.apply(KeypadAction::MemoryStore);
        session.apply(KeypadAction::Clear);
        type_keys(&mut session, "2.5");
        assert_eq!(session.memory_add(), Ok(12.5));
        assert_eq!(session.memory_subtract(), Ok(10.0));
        let notes = session.take_notifications();
        assert_eq!(notes[1].detail, "Added 2.5 to memory");
        assert_eq!(notes[2].detail, "Subtracted 2.5 from memory");
        assert!(notes.iter().all(|n| !n.is_error()));
    }

    #[test]
    fn test_memory_subtract_on_empty() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "3");
        assert_eq!(session.memory_subtract(), Err(MemoryError::Empty));
        assert_eq!(titles(&mut session), vec!["Memory Empty"]);
        assert!(session.memory().is_empty());
    }

    #[test]
    fn test_memory_add_error_operand() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "3");
        session.memory_store().unwrap();
        type_keys(&mut session, "/0=");
        session.take_notifications();
        assert!(session.memory_add().is_err());
        assert!(session.memory_subtract().is_err());
        let notes = session.take_notifications();
        assert_eq!(notes[0].detail, "Could not add to memory");
        assert_eq!(notes[1].detail, "Could not subtract from memory");
        assert_eq!(session.memory().value(), Some(3.0));
    }

    // ===== History and modes =====

    #[test]
    fn test_replay_history() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "6*7=");
        session.apply(KeypadAction::Clear);
        assert!(session.replay_history(0));
        assert_eq!(session.shown_text(), "42");
        assert_eq!(session.expression_text(), "42");
        assert!(!session.replay_history(5));
    }

    #[test]
    fn test_clear_history() {
        let mut session = CalculatorSession::new();
        type_keys(&mut session, "1+1=");
        session.clear_history();
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_toggles() {
        let mut session = CalculatorSession::new();
        session.apply(KeypadAction::ToggleHistory);
        session.apply(KeypadAction::ToggleScientific);
        assert!(session.modes().show_history);
        assert!(session.modes().show_scientific);
        session.apply(KeypadAction::ToggleHistory);
        assert!(!session.modes().show_history);
    }
}
