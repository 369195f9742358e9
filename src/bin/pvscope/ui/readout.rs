//! Measurement and cursor readout panels

use pvrsd_scope::{Frame, ScopeStatus};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame as TermFrame,
};

use super::format::{format_frequency, format_time};

/// Render the measurement table for the latest frame
pub fn render_measurements(frame: &mut TermFrame, area: Rect, latest: Option<&Frame>) {
    let block = Block::default()
        .title(" Measurements ")
        .borders(Borders::ALL);

    let Some(latest) = latest else {
        let waiting = Paragraph::new(" waiting for first acquisition...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(waiting, area);
        return;
    };

    let m = &latest.measurements;
    let rows = vec![
        Row::new(vec!["Vpp".to_string(), format!("{:.4} V", m.peak_to_peak)]),
        Row::new(vec!["Vrms".to_string(), format!("{:.4} V", m.rms)]),
        Row::new(vec![
            "Freq".to_string(),
            format_frequency(m.estimated_frequency),
        ]),
        Row::new(vec!["Period".to_string(), format_time(m.estimated_period)]),
        Row::new(vec![
            "Frame".to_string(),
            format!("#{} ({} samples)", latest.sequence, latest.samples.len()),
        ]),
    ];

    let table = Table::new(rows, [Constraint::Length(10), Constraint::Min(20)])
        .style(Style::default().fg(Color::Magenta))
        .block(block);
    frame.render_widget(table, area);
}

/// Render the cursor panel (positions over the visible window and the delta)
pub fn render_cursors(frame: &mut TermFrame, area: Rect, status: &ScopeStatus) {
    let block = Block::default().title(" Cursors ").borders(Borders::ALL);

    let window = status.time_scale.window_length();
    let cursors = status.cursors;
    let delta = status.cursor_delta;

    let rows = vec![
        Row::new(vec![
            "C1".to_string(),
            format!("{:.2}", cursors.cursor1()),
            format_time(cursors.cursor1() * window),
        ]),
        Row::new(vec![
            "C2".to_string(),
            format!("{:.2}", cursors.cursor2()),
            format_time(cursors.cursor2() * window),
        ]),
        Row::new(vec![
            "ΔT".to_string(),
            String::new(),
            format_time(delta.delta_time),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
        Row::new(vec![
            "1/ΔT".to_string(),
            String::new(),
            format_frequency(delta.delta_frequency),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    ];

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Min(12),
        ],
    )
    .style(Style::default().fg(Color::Cyan))
    .block(block);
    frame.render_widget(table, area);
}
