//! Surface-independent calculator checks
//!
//! A [`CalculatorDriver`] exposes the calculator the way a user sees it:
//! press actions, read the two display texts. The `verify_*` functions are
//! written once against the trait and run against every surface.

use crate::core::history::HistoryEntry;
use crate::core::{Constant, Function, Notification, NotificationKind, Operation};
use crate::keypad::{key_to_action, KeypadAction};
use crate::session::CalculatorSession;

/// Drives a calculator through its input surface
pub trait CalculatorDriver {
    /// Presses one keypad action
    fn press(&mut self, action: KeypadAction);

    /// Gets the operand display
    fn shown_text(&self) -> String;

    /// Gets the expression display
    fn expression_text(&self) -> String;

    /// Gets history entries (newest first)
    fn history(&self) -> Vec<HistoryEntry>;

    /// Drains pending notifications
    fn take_notifications(&mut self) -> Vec<Notification>;

    /// Types characters through the keyboard map; unmapped characters are skipped
    fn type_keys(&mut self, keys: &str) {
        for ch in keys.chars() {
            if let Some(action) = key_to_action(ch.encode_utf8(&mut [0; 4])) {
                self.press(action);
            }
        }
    }

    /// Clears, types `keys`, presses `=` and returns the operand display
    fn calculate(&mut self, keys: &str) -> String {
        self.press(KeypadAction::Clear);
        self.type_keys(keys);
        self.press(KeypadAction::Equals);
        self.shown_text()
    }
}

impl CalculatorDriver for CalculatorSession {
    fn press(&mut self, action: KeypadAction) {
        self.apply(action);
    }

    fn shown_text(&self) -> String {
        CalculatorSession::shown_text(self).to_string()
    }

    fn expression_text(&self) -> String {
        CalculatorSession::expression_text(self).to_string()
    }

    fn history(&self) -> Vec<HistoryEntry> {
        CalculatorSession::history(self).iter().cloned().collect()
    }

    fn take_notifications(&mut self) -> Vec<Notification> {
        CalculatorSession::take_notifications(self)
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{CalculatorDriver, HistoryEntry, KeypadAction, Notification};
    use crate::tui::CalculatorApp;

    /// Drives the TUI app through key events and keypad clicks
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self { app }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Returns a mutable reference to the underlying app
        pub fn app_mut(&mut self) -> &mut CalculatorApp {
            &mut self.app
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press(&mut self, action: KeypadAction) {
            self.app.press(action);
        }

        fn shown_text(&self) -> String {
            self.app.session().shown_text().to_string()
        }

        fn expression_text(&self) -> String {
            self.app.session().expression_text().to_string()
        }

        fn history(&self) -> Vec<HistoryEntry> {
            self.app.session().history().iter().cloned().collect()
        }

        fn take_notifications(&mut self) -> Vec<Notification> {
            self.app.take_notifications()
        }

        fn type_keys(&mut self, keys: &str) {
            for ch in keys.chars() {
                let code = match ch {
                    '\n' => KeyCode::Enter,
                    '\u{8}' => KeyCode::Backspace,
                    '\u{1b}' => KeyCode::Esc,
                    other => KeyCode::Char(other),
                };
                self.app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
            }
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Shared behaviour checks =====
// These work with ANY CalculatorDriver implementation

/// Verifies digit entry and the four basic operators
pub fn verify_basic_arithmetic<D: CalculatorDriver>(driver: &mut D) {
    driver.press(KeypadAction::Clear);
    driver.type_keys("05");
    assert_eq!(driver.shown_text(), "5");
    assert_eq!(driver.expression_text(), "05");

    assert_eq!(driver.calculate("2+3"), "5");
    assert_eq!(driver.calculate("10-4"), "6");
    assert_eq!(driver.calculate("6*7"), "42");
    assert_eq!(driver.calculate("20/4"), "5");
    assert_eq!(driver.calculate("17%5"), "2");
    assert_eq!(driver.calculate("2/3"), "0.6666666667");
}

/// Verifies operator precedence and grouping
pub fn verify_precedence<D: CalculatorDriver>(driver: &mut D) {
    assert_eq!(driver.calculate("2+3*4"), "14");
    assert_eq!(driver.calculate("(2+3)*4"), "20");
    assert_eq!(driver.calculate("2*3^2"), "18");
    assert_eq!(driver.calculate("2^3^2"), "512");
    assert_eq!(driver.calculate("-2^2"), "-4");
}

/// Verifies the error sentinel and recovery from it
pub fn verify_error_handling<D: CalculatorDriver>(driver: &mut D) {
    assert_eq!(driver.calculate("1/0"), "Error");
    assert_eq!(driver.expression_text(), "1/0");
    let notes = driver.take_notifications();
    assert!(notes
        .iter()
        .any(|n| n.kind == NotificationKind::Error && n.title == "Calculation Error"));

    driver.type_keys("+");
    assert_eq!(driver.shown_text(), "Error", "operators are ignored in error state");

    driver.press(KeypadAction::Delete);
    assert_eq!(driver.shown_text(), "0");
    assert_eq!(driver.expression_text(), "");

    assert_eq!(driver.calculate("(2+3"), "Error");
    driver.type_keys("7");
    assert_eq!(driver.shown_text(), "7");
    driver.take_notifications();
}

/// Verifies functions, constants, powers and negation
pub fn verify_scientific<D: CalculatorDriver>(driver: &mut D) {
    driver.press(KeypadAction::Clear);
    driver.press(KeypadAction::Function(Function::Sqrt));
    driver.type_keys("16)");
    driver.press(KeypadAction::Operator(Operation::Add));
    driver.type_keys("3");
    driver.press(KeypadAction::Cube);
    driver.press(KeypadAction::Equals);
    assert_eq!(driver.shown_text(), "31");

    driver.press(KeypadAction::Clear);
    driver.type_keys("2*");
    driver.press(KeypadAction::Constant(Constant::Pi));
    assert_eq!(driver.shown_text(), "π");
    driver.press(KeypadAction::Equals);
    assert_eq!(driver.shown_text(), "6.2831853072");

    driver.press(KeypadAction::Clear);
    driver.type_keys("2+3");
    driver.press(KeypadAction::Negate);
    assert_eq!(driver.shown_text(), "-3");
    assert_eq!(driver.expression_text(), "(2+3) * -1");
    driver.press(KeypadAction::Equals);
    assert_eq!(driver.shown_text(), "-5");
}

/// Verifies the memory register and its notifications
pub fn verify_memory<D: CalculatorDriver>(driver: &mut D) {
    driver.press(KeypadAction::MemoryClear);
    driver.take_notifications();

    driver.press(KeypadAction::MemoryRecall);
    let notes = driver.take_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Memory Empty");

    driver.press(KeypadAction::Clear);
    driver.type_keys("8");
    driver.press(KeypadAction::MemoryStore);
    driver.press(KeypadAction::Clear);
    driver.type_keys("2");
    driver.press(KeypadAction::MemoryAdd);
    driver.press(KeypadAction::Clear);
    driver.type_keys("1+");
    driver.press(KeypadAction::MemoryRecall);
    assert_eq!(driver.shown_text(), "10");
    assert_eq!(driver.expression_text(), "1+10");
    driver.press(KeypadAction::Equals);
    assert_eq!(driver.shown_text(), "11");

    let titles: Vec<String> = driver
        .take_notifications()
        .into_iter()
        .map(|n| n.title)
        .collect();
    assert_eq!(titles, vec!["Memory Stored", "Memory Updated"]);

    driver.press(KeypadAction::MemoryClear);
    driver.press(KeypadAction::MemorySubtract);
    let notes = driver.take_notifications();
    assert_eq!(notes[0].title, "Memory Cleared");
    assert_eq!(notes[1].title, "Memory Empty");
}

/// Verifies history order, capping and recording
pub fn verify_history<D: CalculatorDriver>(driver: &mut D) {
    for i in 0..12 {
        driver.calculate(&format!("{i}+1"));
    }
    let history = driver.history();
    assert_eq!(history.len(), 10);
    assert_eq!(history[0].expression, "11+1");
    assert_eq!(history[0].result, "12");
    assert_eq!(history[9].expression, "2+1");
}

/// Verifies delete rebuilding the operand
pub fn verify_delete<D: CalculatorDriver>(driver: &mut D) {
    driver.press(KeypadAction::Clear);
    driver.type_keys("12+");
    driver.press(KeypadAction::Delete);
    assert_eq!(driver.shown_text(), "12");
    assert_eq!(driver.expression_text(), "12");
    driver.press(KeypadAction::Delete);
    assert_eq!(driver.shown_text(), "1");
    driver.press(KeypadAction::Delete);
    assert_eq!(driver.shown_text(), "0");
    assert_eq!(driver.expression_text(), "");
}

/// Complete verification suite
pub fn run_full_suite<D: CalculatorDriver>(driver: &mut D) {
    verify_basic_arithmetic(driver);
    verify_precedence(driver);
    verify_error_handling(driver);
    verify_scientific(driver);
    verify_memory(driver);
    verify_history(driver);
    verify_delete(driver);
}
