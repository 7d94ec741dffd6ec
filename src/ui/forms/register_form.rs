//! Registration form rendering

use super::field_renderer::{
    draw_checkbox, draw_dropdown, draw_dropdown_list, draw_field_error, draw_radio_group,
    draw_text_input, error_text_width, FieldView, FIELD_HEIGHT,
};
use crate::app::App;
use crate::state::FieldKind;
use crate::ui::components::{render_submit_button, BUTTON_HEIGHT};
use crate::ui::widgets::wrap_text;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

/// Draw every field, the submit button and, on top, an open dropdown list
pub fn draw_register_form(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.state.form;
    let fields = form.fields();

    // Each error wraps onto its own rows under the field
    let error_width = error_text_width(area.width);
    let error_lines: Vec<Vec<String>> = fields
        .iter()
        .map(|field| {
            form.visible_error(field.name)
                .map(|error| wrap_text(error, error_width))
                .unwrap_or_default()
        })
        .collect();

    let mut constraints: Vec<Constraint> = error_lines
        .iter()
        .map(|lines| Constraint::Length(FIELD_HEIGHT + lines.len() as u16))
        .collect();
    constraints.push(Constraint::Length(BUTTON_HEIGHT));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut field_areas = Vec::with_capacity(fields.len());
    for (index, field) in fields.iter().enumerate() {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(FIELD_HEIGHT), Constraint::Min(0)])
            .split(chunks[index]);
        let (chunk, error_area) = (rows[0], rows[1]);
        field_areas.push(chunk);

        let value = form.watch(field.name);
        let view = FieldView {
            is_active: form.active_field_index == index,
            error: form.visible_error(field.name),
            mask_password: app.state.mask_password,
            radio_highlight: form.radio_highlight,
            dropdown_open: form.dropdown.open && form.active_field_index == index,
        };
        match field.kind {
            FieldKind::Text | FieldKind::Email | FieldKind::Password => {
                draw_text_input(frame, chunk, field, &value, view)
            }
            FieldKind::Radio(_) => draw_radio_group(frame, chunk, field, &value, view),
            FieldKind::Dropdown(_) => draw_dropdown(frame, chunk, field, &value, view),
            FieldKind::Checkbox => draw_checkbox(frame, chunk, field, &value, view),
        }
        if !error_lines[index].is_empty() {
            draw_field_error(frame, error_area, &error_lines[index]);
        }
    }

    render_submit_button(
        frame,
        chunks[fields.len()],
        form.is_submit_button_active(),
        form.is_valid(),
        app.state.spinner.as_ref().map(|s| s.frame()),
    );

    if form.dropdown.open {
        if let Some(field) = form.active_adapter() {
            draw_dropdown_list(
                frame,
                field_areas[form.active_field_index],
                area,
                field,
                form.dropdown.highlighted,
            );
        }
    }
}
