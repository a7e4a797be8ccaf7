//! Layout and status bar

use crate::app::App;
use crate::platform::{MODE_SHORTCUT, RESET_SHORTCUT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Split the screen into the form area and a one-line status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

/// Draw the status bar with key hints and the last status message
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        get_hints(),
        Style::default().fg(Color::White),
    )];

    if let Some(msg) = &app.status_message {
        let color = if app.form_state().is_valid {
            Color::Green
        } else {
            Color::Yellow
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(color)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}

/// Keyboard hints for the form view
fn get_hints() -> String {
    format!(
        "Tab:next  Enter:submit  {}:reset  {}:mode  Esc:quit",
        RESET_SHORTCUT, MODE_SHORTCUT
    )
}
