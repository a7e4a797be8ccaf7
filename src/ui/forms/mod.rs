//! Form rendering module
//!
//! - `field_renderer`: single field drawing
//! - `draw_form`: every field of the app's form, top to bottom

mod field_renderer;

use crate::app::App;
use field_renderer::{draw_field, FIELD_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the form with all of its inputs
pub fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.form_state();
    let flags = format!(
        " {} [{}] dirty:{} valid:{} submits:{} ",
        app.title(),
        app.mode(),
        state.is_dirty,
        state.is_valid,
        state.submit_count
    );
    let block = Block::default()
        .title(flags)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = app
        .inputs
        .iter()
        .map(|_| Constraint::Length(FIELD_HEIGHT))
        .collect();
    constraints.push(Constraint::Min(0));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (index, input) in app.inputs.iter().enumerate() {
        let value = app.field_value(index);
        let error = app.field_error(index);
        draw_field(
            frame,
            rows[index],
            &input.label,
            &value,
            error.as_deref(),
            index == app.active_field,
        );
    }
}
