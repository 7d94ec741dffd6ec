//! Layout components (header, form column, status bar)

use crate::app::App;
use crate::platform::{RESET_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::FieldKind;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Width of the centered form column
const FORM_WIDTH: u16 = 60;

/// Split the screen into header, form column and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Form
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let form_width = FORM_WIDTH.min(rows[1].width);
    let form_area = Rect {
        x: rows[1].x + (rows[1].width - form_width) / 2,
        width: form_width,
        ..rows[1]
    };

    (rows[0], form_area, rows[2])
}

/// Draw the title line
pub fn draw_header(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "Register",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::raw(" ")];

    // Message first so it survives truncation on narrow terminals
    if let Some(msg) = &app.state.status_message {
        let color = if app.state.form.is_submitting() {
            Color::Yellow
        } else if app.state.form.is_submit_successful() {
            Color::Green
        } else {
            Color::White
        };
        spans.push(Span::styled(msg, Style::default().fg(color)));
        if let Some(receipt) = app
            .state
            .last_receipt
            .as_ref()
            .filter(|_| app.state.form.is_submit_successful())
        {
            spans.push(Span::styled(
                format!(" #{}", receipt.short_id()),
                Style::default().fg(Color::Gray),
            ));
        }
        spans.push(Span::raw(" | "));
    }

    let hints = get_field_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}

/// Keyboard hints for the focused field
fn get_field_hints(app: &App) -> String {
    let form = &app.state.form;
    let specific = if form.dropdown.open {
        "j/k:choose  Enter:select  Esc:close".to_string()
    } else {
        match form.active_adapter().map(|f| &f.kind) {
            None => "Enter:submit".to_string(),
            Some(FieldKind::Radio(_)) => "←/→:choose".to_string(),
            Some(FieldKind::Dropdown(_)) => "Enter:open".to_string(),
            Some(FieldKind::Checkbox) => "Space:toggle".to_string(),
            Some(_) => "type to edit".to_string(),
        }
    };
    format!("Tab:next  {specific}  {SUBMIT_SHORTCUT}:submit  {RESET_SHORTCUT}:reset  Esc:quit")
}
