//! TUI module for pvscope
//!
//! Numeric readouts only: acquisition status, measurements and cursors.

pub mod format;
mod readout;
mod status;

use pvrsd_scope::{Frame, ScopeStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame as TermFrame,
};

use readout::{render_cursors, render_measurements};
use status::render_status;

/// Everything a single draw needs
pub struct View<'a> {
    pub status: &'a ScopeStatus,
    pub frame: Option<&'a Frame>,
    pub notice: Option<&'a str>,
}

const HELP: &str = " [Q] Quit  [Space] Run/Stop  [S] Single  [R] Reset  [W] Wave  [f/F] Freq  \
[a/A] Ampl  [o/O] Offset  [ [ ] ] Zoom  [←/→] C1  [,/.] C2  [E] Export";

/// Render the UI
pub fn render(frame: &mut TermFrame, view: &View) {
    let area = frame.area();

    // Main layout: status, measurements, cursors, help
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status bar
            Constraint::Min(7),    // Measurements
            Constraint::Length(7), // Cursors
            Constraint::Length(1), // Help bar
        ])
        .split(area);

    render_status(frame, chunks[0], view.status);
    render_measurements(frame, chunks[1], view.frame);
    render_cursors(frame, chunks[2], view.status);

    let help = match view.notice {
        Some(notice) => Paragraph::new(format!(" {notice}"))
            .style(Style::default().fg(Color::Yellow)),
        None => Paragraph::new(HELP).style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(help, chunks[3]);
}
