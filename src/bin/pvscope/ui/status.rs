//! Status bar widget - shows run mode, waveform settings and timebase

use pvrsd_scope::{RunMode, ScopeStatus};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::format::{format_frequency, format_time};

/// Horizontal divisions across the visible window, as on a bench scope
const DIVISIONS: f64 = 10.0;

/// Render the status bar
pub fn render_status(frame: &mut Frame, area: Rect, status: &ScopeStatus) {
    let block = Block::default().title(" pvscope ").borders(Borders::ALL);

    let (mode_symbol, mode_str, mode_color) = match status.mode {
        RunMode::Running => ("▶", "Run", Color::Green),
        RunMode::Stopped => ("⏸", "Stop", Color::Red),
        RunMode::Single => ("⏵", "Single", Color::Yellow),
    };

    let spec = status.spec;
    let window = status.time_scale.window_length();

    let line = Line::from(vec![
        Span::styled(
            format!(" {mode_symbol} {mode_str}  "),
            Style::default().fg(mode_color),
        ),
        Span::styled(
            format!("{}  ", spec.kind()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{}  ", format_frequency(spec.frequency())),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("A {:.2} V  Off {:+.2} V  ", spec.amplitude(), spec.offset()),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!(
                "{}/div ({:.1}x)  ",
                format_time(window / DIVISIONS),
                status.time_scale.factor()
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("frames {}", status.frames_captured),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
