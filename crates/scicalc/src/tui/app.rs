//! TUI application state

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use super::input::{InputAction, InputHandler};
use super::keypad::hit_test;
use super::ui::compute_layout;
use crate::config::CalculatorConfig;
use crate::core::Notification;
use crate::keypad::{Keypad, KeypadAction};
use crate::session::CalculatorSession;

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    session: CalculatorSession,
    input: InputHandler,
    standard: Keypad,
    scientific: Keypad,
    memory: Keypad,
    /// Last button pressed, drawn highlighted
    highlighted: Option<KeypadAction>,
    /// Selected history row (0 = newest)
    selected: Option<usize>,
    /// Most recent notification, shown in the status line
    status: Option<Notification>,
    /// Notifications not yet drained by a driver
    notifications: Vec<Notification>,
    /// Terminal area of the last frame
    area: Rect,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a new calculator app with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&CalculatorConfig::default())
    }

    /// Creates a calculator app from a configuration
    #[must_use]
    pub fn with_config(config: &CalculatorConfig) -> Self {
        Self {
            session: CalculatorSession::with_config(config),
            input: InputHandler::new(),
            standard: Keypad::standard(),
            scientific: Keypad::scientific(),
            memory: Keypad::memory(),
            highlighted: None,
            selected: None,
            status: None,
            notifications: Vec::new(),
            area: Rect::new(0, 0, 80, 24),
            should_quit: false,
        }
    }

    /// Returns the calculator session
    #[must_use]
    pub fn session(&self) -> &CalculatorSession {
        &self.session
    }

    /// Returns the standard keypad
    #[must_use]
    pub fn standard_keypad(&self) -> &Keypad {
        &self.standard
    }

    /// Returns the scientific keypad
    #[must_use]
    pub fn scientific_keypad(&self) -> &Keypad {
        &self.scientific
    }

    /// Returns the memory keypad
    #[must_use]
    pub fn memory_keypad(&self) -> &Keypad {
        &self.memory
    }

    /// Returns the highlighted button
    #[must_use]
    pub fn highlighted(&self) -> Option<KeypadAction> {
        self.highlighted
    }

    /// Returns the selected history row
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Returns the status-line notification
    #[must_use]
    pub fn status(&self) -> Option<&Notification> {
        self.status.as_ref()
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Records the terminal area used for mouse hit-testing
    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    /// Drains notifications produced since the last call
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Applies a keypad action and collects its notifications
    pub fn press(&mut self, action: KeypadAction) {
        self.session.apply(action);
        self.highlighted = Some(action);
        let fresh = self.session.take_notifications();
        if let Some(last) = fresh.last() {
            self.status = Some(last.clone());
        }
        self.notifications.extend(fresh);
    }

    /// Dispatches a terminal event
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.set_area(Rect::new(0, 0, width, height)),
            _ => {}
        }
    }

    /// Handles a key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.input.handle_key(key) {
            InputAction::Keypad(action) => self.press(action),
            InputAction::SelectPrevious => self.select_previous(),
            InputAction::SelectNext => self.select_next(),
            InputAction::ReplaySelected => self.replay_selected(),
            InputAction::Quit => self.quit(),
            InputAction::None => {}
        }
    }

    /// Handles a left click on a keypad button or a history row
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let (x, y) = (mouse.column, mouse.row);
        let layout = compute_layout(self.area, self.session.modes());

        let keypads = [
            (Some(layout.memory), &self.memory),
            (layout.scientific, &self.scientific),
            (Some(layout.standard), &self.standard),
        ];
        let clicked = keypads
            .into_iter()
            .find_map(|(area, keypad)| area.and_then(|area| hit_test(keypad, area, x, y)));
        if let Some(action) = clicked {
            self.press(action);
            return;
        }

        if let Some(history) = layout.history {
            let top = history.y + 1;
            let inside = x > history.x && x + 1 < history.right() && y >= top;
            let index = usize::from(y.saturating_sub(top));
            if inside && index < self.session.history().len() {
                self.selected = Some(index);
                self.replay_selected();
            }
        }
    }

    /// Moves the history selection towards newer entries
    pub fn select_previous(&mut self) {
        if self.session.history().is_empty() {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
    }

    /// Moves the history selection towards older entries
    pub fn select_next(&mut self) {
        let len = self.session.history().len();
        if len == 0 {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| (i + 1).min(len - 1)));
    }

    /// Replays the selected history entry
    pub fn replay_selected(&mut self) {
        if let Some(index) = self.selected {
            if self.session.replay_history(index) {
                self.highlighted = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn type_str(app: &mut CalculatorApp, keys: &str) {
        for ch in keys.chars() {
            app.handle_key(key(KeyCode::Char(ch)));
        }
    }

    // ===== Constructor tests =====

    #[test]
    fn test_app_new() {
        let app = CalculatorApp::new();
        assert_eq!(app.session().shown_text(), "0");
        assert!(app.highlighted().is_none());
        assert!(app.selected().is_none());
        assert!(app.status().is_none());
        assert!(!app.should_quit());
        assert_eq!(app.standard_keypad(), &Keypad::standard());
    }

    #[test]
    fn test_app_with_config() {
        let config = CalculatorConfig::new().with_precision(3);
        let mut app = CalculatorApp::with_config(&config);
        type_str(&mut app, "1/3");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session().shown_text(), "0.333");
    }

    // ===== Keyboard =====

    #[test]
    fn test_keys_drive_session() {
        let mut app = CalculatorApp::new();
        type_str(&mut app, "42*(3+7)");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.session().shown_text(), "420");
        assert_eq!(app.highlighted(), Some(KeypadAction::Equals));
    }

    #[test]
    fn test_quit_keys() {
        let mut app = CalculatorApp::new();
        app.handle_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn test_release_events_ignored() {
        let mut app = CalculatorApp::new();
        let mut release = key(KeyCode::Char('5'));
        release.kind = KeyEventKind::Release;
        app.handle_event(Event::Key(release));
        assert_eq!(app.session().shown_text(), "0");
        app.handle_event(Event::Key(key(KeyCode::Char('5'))));
        assert_eq!(app.session().shown_text(), "5");
    }

    #[test]
    fn test_status_tracks_last_notification() {
        let mut app = CalculatorApp::new();
        type_str(&mut app, "1/0=");
        assert_eq!(app.status().unwrap().title, "Calculation Error");
        app.press(KeypadAction::MemoryClear);
        assert_eq!(app.status().unwrap().title, "Memory Cleared");
        let notes = app.take_notifications();
        assert_eq!(notes.len(), 2);
        assert!(app.take_notifications().is_empty());
        assert!(app.status().is_some());
    }

    // ===== History selection =====

    #[test]
    fn test_select_and_replay() {
        let mut app = CalculatorApp::new();
        type_str(&mut app, "1+1=");
        app.press(KeypadAction::Clear);
        type_str(&mut app, "2+2=");
        app.press(KeypadAction::Clear);

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected(), Some(0));
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected(), Some(1));
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.session().shown_text(), "2");
        assert_eq!(app.session().expression_text(), "2");

        app.handle_key(key(KeyCode::Up));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected(), Some(0));
    }

    #[test]
    fn test_select_on_empty_history() {
        let mut app = CalculatorApp::new();
        app.select_next();
        app.select_previous();
        app.replay_selected();
        assert!(app.selected().is_none());
    }

    // ===== Mouse =====

    #[test]
    fn test_click_standard_keypad() {
        let mut app = CalculatorApp::new();
        let layout = compute_layout(Rect::new(0, 0, 80, 24), app.session().modes());
        let seven = layout.standard;
        app.handle_mouse(click(seven.x + 1, seven.y + 1 + (seven.height - 2) / 5));
        assert_eq!(app.session().shown_text(), "7");
        assert_eq!(app.highlighted(), Some(KeypadAction::Digit(7)));
    }

    #[test]
    fn test_click_memory_keypad() {
        let mut app = CalculatorApp::new();
        type_str(&mut app, "9");
        let layout = compute_layout(Rect::new(0, 0, 80, 24), app.session().modes());
        let ms_column = layout.memory.x + 1 + 2 * ((layout.memory.width - 2) / 5);
        app.handle_mouse(click(ms_column, layout.memory.y + 1));
        assert_eq!(app.session().memory().value(), Some(9.0));
    }

    #[test]
    fn test_click_history_row_replays() {
        let mut app = CalculatorApp::new();
        type_str(&mut app, "3*3=");
        app.press(KeypadAction::Clear);
        app.press(KeypadAction::ToggleHistory);
        let layout = compute_layout(Rect::new(0, 0, 80, 24), app.session().modes());
        let history = layout.history.unwrap();
        app.handle_mouse(click(history.x + 2, history.y + 1));
        assert_eq!(app.selected(), Some(0));
        assert_eq!(app.session().shown_text(), "9");
    }

    #[test]
    fn test_non_left_click_ignored() {
        let mut app = CalculatorApp::new();
        let mut event = click(2, 10);
        event.kind = MouseEventKind::Moved;
        app.handle_mouse(event);
        assert_eq!(app.session().shown_text(), "0");
        assert!(app.highlighted().is_none());
    }

    #[test]
    fn test_resize_updates_area() {
        let mut app = CalculatorApp::new();
        app.handle_event(Event::Resize(100, 40));
        let layout = compute_layout(Rect::new(0, 0, 100, 40), app.session().modes());
        let seven = layout.standard;
        app.handle_mouse(click(seven.x + 1, seven.y + 1 + (seven.height - 2) / 5));
        assert_eq!(app.session().shown_text(), "7");
    }
}
