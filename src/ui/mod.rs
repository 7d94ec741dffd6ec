//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod widgets;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (header_area, form_area, status_area) = layout::create_layout(area);

    layout::draw_header(frame, header_area);
    forms::draw_register_form(frame, form_area, app);
    layout::draw_status_bar(frame, status_area, app);

    // Error dialog overlays everything (modal)
    if let Some(error) = app.state.current_error() {
        components::render_error_dialog(frame, area, error);
    }
}
