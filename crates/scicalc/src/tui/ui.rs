//! Terminal rendering

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;
use crate::core::NotificationKind;
use crate::session::ModeFlags;

/// Title shown on the outer border
pub const TITLE: &str = " Scientific Calculator ";

/// One-line key reference shown under the keypad
pub const HELP_LINE: &str = "Enter = · Esc C · ⌫ del · F2 hist · F3 sci · ↑↓ Tab replay · ^Q quit";

/// Placeholder for an empty history panel
pub const EMPTY_HISTORY: &str = "No calculation history";

/// Screen regions for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    /// Expression and operand
    pub display: Rect,
    /// Memory keypad row
    pub memory: Rect,
    /// Scientific keypad, when shown
    pub scientific: Option<Rect>,
    /// Standard keypad
    pub standard: Rect,
    /// Last notification
    pub status: Rect,
    /// Key reference
    pub help: Rect,
    /// History panel, when shown
    pub history: Option<Rect>,
}

/// Splits the terminal area for the given modes
#[must_use]
pub fn compute_layout(area: Rect, modes: ModeFlags) -> UiLayout {
    let inner = Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };

    let (main, history) = if modes.show_history {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(30), Constraint::Length(30)])
            .split(inner);
        (columns[0], Some(columns[1]))
    } else {
        (inner, None)
    };

    let scientific_height = if modes.show_scientific { 6 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(scientific_height),
            Constraint::Min(7),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(main);

    UiLayout {
        display: rows[0],
        memory: rows[1],
        scientific: modes.show_scientific.then_some(rows[2]),
        standard: rows[3],
        status: rows[4],
        help: rows[5],
        history,
    }
}

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let state = self.app.session().state();
        let expression = if state.expression_text.is_empty() {
            "0"
        } else {
            state.expression_text.as_str()
        };
        let shown_style = if state.is_error() {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        };

        let memory_flag = if self.app.session().memory().is_empty() {
            ""
        } else {
            "M "
        };

        Paragraph::new(vec![
            Line::from(Span::styled(expression, Style::default().fg(Color::Gray))),
            Line::from(vec![
                Span::styled(memory_flag, Style::default().fg(Color::Magenta)),
                Span::styled(state.shown_text.as_str(), shown_style),
            ]),
        ])
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .render(area, buf);
    }

    fn render_history(&self, area: Rect, buf: &mut Buffer) {
        let history = self.app.session().history();
        let block = Block::default()
            .title(" History ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue));

        if history.is_empty() {
            Paragraph::new(Span::styled(EMPTY_HISTORY, Style::default().fg(Color::DarkGray)))
                .alignment(Alignment::Center)
                .block(block)
                .render(area, buf);
            return;
        }

        let items: Vec<ListItem> = history
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if self.app.selected() == Some(i) {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Span::styled(entry.display(), style))
            })
            .collect();

        List::new(items).block(block).render(area, buf);
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let Some(status) = self.app.status() else {
            return;
        };
        let color = match status.kind {
            NotificationKind::Error => Color::Red,
            NotificationKind::Info => Color::Green,
        };
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{}: ", status.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(status.detail.as_str()),
        ]))
        .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let layout = compute_layout(area, self.app.session().modes());
        let highlighted = self.app.highlighted();

        self.render_display(layout.display, buf);
        KeypadWidget::new(self.app.memory_keypad(), " Memory ")
            .highlight(highlighted)
            .render(layout.memory, buf);
        if let Some(scientific) = layout.scientific {
            KeypadWidget::new(self.app.scientific_keypad(), " Scientific ")
                .highlight(highlighted)
                .render(scientific, buf);
        }
        KeypadWidget::new(self.app.standard_keypad(), " Keypad ")
            .highlight(highlighted)
            .render(layout.standard, buf);
        self.render_status(layout.status, buf);
        Paragraph::new(Span::styled(HELP_LINE, Style::default().fg(Color::DarkGray)))
            .render(layout.help, buf);
        if let Some(history) = layout.history {
            self.render_history(history, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypad::KeypadAction;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw(app: &CalculatorApp) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn typed(keys: &str) -> CalculatorApp {
        let mut app = CalculatorApp::new();
        for ch in keys.chars() {
            app.handle_key(crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Char(ch),
                crossterm::event::KeyModifiers::NONE,
            ));
        }
        app
    }

    // ===== Layout =====

    #[test]
    fn test_layout_default_modes() {
        let layout = compute_layout(Rect::new(0, 0, 80, 24), ModeFlags::default());
        assert!(layout.scientific.is_none());
        assert!(layout.history.is_none());
        assert_eq!(layout.display.height, 4);
        assert_eq!(layout.memory.height, 3);
        assert!(layout.standard.height >= 7);
        assert_eq!(layout.display.width, 78);
    }

    #[test]
    fn test_layout_all_panels() {
        let modes = ModeFlags {
            show_history: true,
            show_scientific: true,
        };
        let layout = compute_layout(Rect::new(0, 0, 80, 24), modes);
        assert_eq!(layout.scientific.unwrap().height, 6);
        let history = layout.history.unwrap();
        assert_eq!(history.width, 30);
        assert!(layout.display.width >= 30);
        assert_eq!(layout.display.width + history.width, 78);
    }

    // ===== Rendering =====

    #[test]
    fn test_render_initial() {
        let content = draw(&CalculatorApp::new());
        assert!(content.contains("Scientific Calculator"));
        assert!(content.contains("[MC]"));
        assert!(content.contains("[7]"));
        assert!(!content.contains("[sin]"));
    }

    #[test]
    fn test_render_expression_and_operand() {
        let content = draw(&typed("12+34"));
        assert!(content.contains("12+34"));
        assert!(content.contains("34"));
    }

    #[test]
    fn test_render_error_and_status() {
        let content = draw(&typed("1/0="));
        assert!(content.contains("Error"));
        assert!(content.contains("Calculation Error: Invalid mathematical expression"));
    }

    #[test]
    fn test_render_scientific_keypad() {
        let mut app = CalculatorApp::new();
        app.press(KeypadAction::ToggleScientific);
        let content = draw(&app);
        assert!(content.contains("[sin]"));
        assert!(content.contains("[√]"));
    }

    #[test]
    fn test_render_history_panel() {
        let mut app = typed("6*7=");
        app.press(KeypadAction::ToggleHistory);
        let content = draw(&app);
        assert!(content.contains("6*7 = 42"));
    }

    #[test]
    fn test_render_empty_history_panel() {
        let mut app = CalculatorApp::new();
        app.press(KeypadAction::ToggleHistory);
        assert!(draw(&app).contains(EMPTY_HISTORY));
    }

    #[test]
    fn test_render_memory_flag() {
        let mut app = typed("5");
        app.press(KeypadAction::MemoryStore);
        let content = draw(&app);
        assert!(content.contains("M 5"));
        assert!(content.contains("Memory Stored"));
    }
}
