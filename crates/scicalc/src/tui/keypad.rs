//! Keypad rendering and mouse hit-testing

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Widget},
};

use crate::keypad::{Keypad, KeypadAction, KeypadButtonDef};

/// Size of one grid cell inside the keypad border, or `None` if it does not fit
fn cell_size(keypad: &Keypad, area: Rect) -> Option<(u16, u16)> {
    let (rows, cols) = keypad.dimensions();
    if rows == 0 || cols == 0 {
        return None;
    }
    let width = area.width.saturating_sub(2) / cols as u16;
    let height = area.height.saturating_sub(2) / rows as u16;
    (width > 0 && height > 0).then_some((width, height))
}

/// Resolves a click at `(x, y)` to the button drawn there
#[must_use]
pub fn hit_test(keypad: &Keypad, area: Rect, x: u16, y: u16) -> Option<KeypadAction> {
    if x <= area.x
        || y <= area.y
        || x >= area.right().saturating_sub(1)
        || y >= area.bottom().saturating_sub(1)
    {
        return None;
    }
    let (width, height) = cell_size(keypad, area)?;
    let col = ((x - area.x - 1) / width) as usize;
    let row = ((y - area.y - 1) / height) as usize;
    keypad.get_button_at(row, col).map(|b| b.action)
}

fn button_style(button: &KeypadButtonDef, highlighted: bool) -> Style {
    if highlighted {
        return Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
    }
    match button.action {
        KeypadAction::Digit(_) | KeypadAction::Decimal => Style::default().fg(Color::White),
        KeypadAction::Operator(_) => Style::default().fg(Color::Yellow),
        KeypadAction::Equals => Style::default().fg(Color::Green),
        KeypadAction::Clear | KeypadAction::Delete => Style::default().fg(Color::Red),
        action if action.is_memory() => Style::default().fg(Color::Magenta),
        _ => Style::default().fg(Color::Cyan),
    }
}

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
    title: &'a str,
    highlighted: Option<KeypadAction>,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad, title: &'a str) -> Self {
        Self {
            keypad,
            title,
            highlighted: None,
        }
    }

    /// Highlights the button for `action`
    #[must_use]
    pub fn highlight(mut self, action: Option<KeypadAction>) -> Self {
        self.highlighted = action;
        self
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        let Some((width, height)) = cell_size(self.keypad, area) else {
            return;
        };

        for button in self.keypad.buttons() {
            let x = area.x + 1 + button.col as u16 * width;
            let y = area.y + 1 + button.row as u16 * height + height / 2;
            let span_width = width * button.span as u16;
            let label = format!("[{}]", button.action.label());
            let label_width = label.chars().count() as u16;
            if label_width > span_width {
                continue;
            }
            let label_x = x + (span_width - label_width) / 2;
            let style = button_style(button, self.highlighted == Some(button.action));
            buf.set_span(label_x, y, &Span::styled(label, style), span_width);
        }
    }
}
