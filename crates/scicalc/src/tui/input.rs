//! Keyboard input mapping for the terminal surface

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::keypad::{key_to_action, KeypadAction};

/// What a key press asks the terminal app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Forward a keypad action to the session
    Keypad(KeypadAction),
    /// Move the history selection towards newer entries
    SelectPrevious,
    /// Move the history selection towards older entries
    SelectNext,
    /// Replay the selected history entry
    ReplaySelected,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> InputAction {
        let KeyEvent {
            code, modifiers, ..
        } = event;

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => InputAction::Quit,
                _ => InputAction::None,
            };
        }

        let key = match code {
            KeyCode::F(2) => return InputAction::Keypad(KeypadAction::ToggleHistory),
            KeyCode::F(3) => return InputAction::Keypad(KeypadAction::ToggleScientific),
            KeyCode::Up => return InputAction::SelectPrevious,
            KeyCode::Down => return InputAction::SelectNext,
            KeyCode::Tab => return InputAction::ReplaySelected,
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Esc => "Escape".to_string(),
            KeyCode::Char(c) => c.to_string(),
            _ => return InputAction::None,
        };

        key_to_action(&key).map_or(InputAction::None, InputAction::Keypad)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operation;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_event_ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn test_handle_digit_keys() {
        let handler = InputHandler::new();
        for d in 0..=9u8 {
            let c = char::from(b'0' + d);
            assert_eq!(
                handler.handle_key(key_event(KeyCode::Char(c))),
                InputAction::Keypad(KeypadAction::Digit(d))
            );
        }
    }

    #[test]
    fn test_handle_operator_keys() {
        let handler = InputHandler::new();
        for c in ['+', '-', '*', '/', '%', '^'] {
            assert_eq!(
                handler.handle_key(key_event(KeyCode::Char(c))),
                InputAction::Keypad(KeypadAction::Operator(Operation::from_char(c).unwrap()))
            );
        }
    }

    #[test]
    fn test_handle_edit_keys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Enter)),
            InputAction::Keypad(KeypadAction::Equals)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('='))),
            InputAction::Keypad(KeypadAction::Equals)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Backspace)),
            InputAction::Keypad(KeypadAction::Delete)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Esc)),
            InputAction::Keypad(KeypadAction::Clear)
        );
    }

    #[test]
    fn test_handle_mode_keys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::F(2))),
            InputAction::Keypad(KeypadAction::ToggleHistory)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::F(3))),
            InputAction::Keypad(KeypadAction::ToggleScientific)
        );
    }

    #[test]
    fn test_handle_history_keys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Up)),
            InputAction::SelectPrevious
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Down)),
            InputAction::SelectNext
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Tab)),
            InputAction::ReplaySelected
        );
    }

    #[test]
    fn test_handle_quit() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('c'))),
            InputAction::Quit
        );
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('q'))),
            InputAction::Quit
        );
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('x'))),
            InputAction::None
        );
    }

    #[test]
    fn test_unmapped_keys() {
        let handler = InputHandler::new();
        for code in [KeyCode::Char('a'), KeyCode::Char(' '), KeyCode::Home, KeyCode::F(5)] {
            assert_eq!(handler.handle_key(key_event(code)), InputAction::None);
        }
    }
}
