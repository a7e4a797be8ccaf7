//! UI module for rendering the TUI

mod forms;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (main_area, status_area) = layout::create_layout(frame.area());

    forms::draw_form(frame, main_area, app);
    layout::draw_status_bar(frame, status_area, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use formbind::state::{FormDefinition, FormMode};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_draw_shows_labels_and_mode() {
        let app = App::new(FormDefinition::signup(), FormMode::Uncontrolled).unwrap();
        let screen = render(&app);

        assert!(screen.contains("Name"));
        assert!(screen.contains("Email"));
        assert!(screen.contains("[uncontrolled]"));
    }

    #[test]
    fn test_draw_shows_validation_error() {
        let mut app = App::new(FormDefinition::signup(), FormMode::Controlled).unwrap();
        app.submit();

        let screen = render(&app);

        assert!(screen.contains("Email is required"));
        assert!(screen.contains("need attention"));
    }
}
