//! Terminal keypad frontend
//!
//! Draws the display, the memory row, the optional scientific keypad and
//! history panel, and the standard keypad. Keys and mouse clicks feed the
//! same [`CalculatorSession`](crate::session::CalculatorSession) the
//! headless driver uses.

mod app;
mod input;
mod keypad;
mod terminal;
mod ui;

use std::io;

use crossterm::event;
use ratatui::{backend::Backend, layout::Rect, Terminal};

pub use app::CalculatorApp;
pub use input::{InputAction, InputHandler};
pub use keypad::{hit_test, KeypadWidget};
pub use terminal::{restore, TerminalSession};
pub use ui::{compute_layout, render, CalculatorUI, UiLayout, EMPTY_HISTORY, HELP_LINE, TITLE};

use crate::config::CalculatorConfig;

/// Runs the interactive calculator until the user quits
pub fn run(config: &CalculatorConfig) -> io::Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut app = CalculatorApp::with_config(config);
    tracing::info!("terminal calculator started");
    let result = run_app(session.terminal_mut(), &mut app);
    tracing::info!(entries = app.session().history().len(), "terminal calculator stopped");
    result
}

/// Draw/read loop over any backend
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut CalculatorApp) -> io::Result<()> {
    while !app.should_quit() {
        let mut area = Rect::default();
        terminal.draw(|frame| {
            area = frame.area();
            render(app, frame);
        })?;
        app.set_area(area);
        app.handle_event(event::read()?);
    }
    Ok(())
}
