//! Field rendering utilities for forms
//!
//! Every widget is drawn from the value held by the form state; nothing here
//! keeps state of its own.

use crate::state::{FieldValue, FormField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::widgets::render_scrollable_list;

/// Rows taken by one field (border + content + border)
pub const FIELD_HEIGHT: u16 = 3;

const CURSOR: &str = "▌";

/// Left offset of error text under a field
const ERROR_INDENT: u16 = 1;

/// How a field should be drawn this frame
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldView<'a> {
    pub is_active: bool,
    pub error: Option<&'a str>,
    pub mask_password: bool,
    /// Highlighted radio option, shown only when active
    pub radio_highlight: usize,
    pub dropdown_open: bool,
}

/// Bordered block titled with the label, red while the field has an error
fn field_block<'a>(label: &'a str, view: &FieldView<'a>) -> Block<'a> {
    let border_color = if view.is_active {
        Color::Cyan
    } else if view.error.is_some() {
        Color::Red
    } else {
        Color::DarkGray
    };

    Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

/// Columns an error message may use under a field of `width`
pub fn error_text_width(width: u16) -> usize {
    width.saturating_sub(ERROR_INDENT * 2).max(1) as usize
}

/// Pre-wrapped error lines under a field
pub fn draw_field_error(frame: &mut Frame, area: Rect, lines: &[String]) {
    let text: Vec<Line> = lines
        .iter()
        .map(|l| Line::from(Span::styled(l.as_str(), Style::default().fg(Color::Red))))
        .collect();
    let area = Rect {
        x: area.x + ERROR_INDENT.min(area.width),
        width: area.width.saturating_sub(ERROR_INDENT),
        ..area
    };
    frame.render_widget(Paragraph::new(text), area);
}

fn value_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    }
}

fn placeholder_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

/// Text, email and password inputs
pub fn draw_text_input(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    value: &FieldValue,
    view: FieldView,
) {
    let display = field.display_value(value, view.mask_password);
    let mut spans = Vec::new();
    if display.is_empty() {
        if view.is_active {
            spans.push(Span::styled(CURSOR, Style::default().fg(Color::Cyan)));
        }
        spans.push(Span::styled(field.placeholder.as_str(), placeholder_style()));
    } else {
        spans.push(Span::styled(display, value_style(view.is_active)));
        if view.is_active {
            spans.push(Span::styled(CURSOR, Style::default().fg(Color::Cyan)));
        }
    }

    let block = field_block(&field.label, &view);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Radio group laid out on one line
pub fn draw_radio_group(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    value: &FieldValue,
    view: FieldView,
) {
    let checked = value.as_choice();
    let mut spans = Vec::new();
    for (i, option) in field.options().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        let is_checked = checked == Some(option.value);
        let marker = if is_checked { "(•)" } else { "( )" };
        let mut style = value_style(view.is_active);
        if is_checked {
            style = style.fg(Color::Green);
        }
        if view.is_active && i == view.radio_highlight {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        spans.push(Span::styled(format!("{marker} {}", option.text), style));
    }

    let block = field_block(&field.label, &view);
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Closed dropdown showing the selected option or the placeholder
pub fn draw_dropdown(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    value: &FieldValue,
    view: FieldView,
) {
    let display = field.display_value(value, view.mask_password);
    let arrow = if view.dropdown_open { "▴" } else { "▾" };
    let label = if display.is_empty() {
        Span::styled(field.placeholder.as_str(), placeholder_style())
    } else {
        Span::styled(display, value_style(view.is_active))
    };
    let inner_width = area.width.saturating_sub(2) as usize;
    let used = label.width() + 1;
    let gap = inner_width.saturating_sub(used);

    let line = Line::from(vec![
        label,
        Span::raw(" ".repeat(gap)),
        Span::styled(arrow, Style::default().fg(Color::Cyan)),
    ]);

    let block = field_block(&field.label, &view);
    frame.render_widget(Paragraph::new(line).block(block), area);
}

/// Option list of an open dropdown, drawn over whatever sits below `anchor`
pub fn draw_dropdown_list(
    frame: &mut Frame,
    anchor: Rect,
    bounds: Rect,
    field: &FormField,
    highlighted: usize,
) {
    let options = field.options();
    let height = (options.len() as u16 + 2).min(bounds.bottom().saturating_sub(anchor.bottom()));
    if height < 3 {
        return;
    }
    let area = Rect {
        x: anchor.x,
        y: anchor.bottom(),
        width: anchor.width,
        height,
    };

    let items: Vec<ListItem> = options
        .iter()
        .map(|option| ListItem::new(option.text))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ");

    frame.render_widget(Clear, area);
    render_scrollable_list(frame, area, list, highlighted);
}

/// Checkbox with its text
pub fn draw_checkbox(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    value: &FieldValue,
    view: FieldView,
) {
    let marker = field.display_value(value, view.mask_password);
    let marker_style = if value.as_flag() {
        Style::default().fg(Color::Green)
    } else {
        value_style(view.is_active)
    };
    let line = Line::from(vec![
        Span::styled(marker, marker_style),
        Span::raw(" "),
        Span::styled(field.label.as_str(), value_style(view.is_active)),
    ]);

    let block = field_block("Terms", &view);
    frame.render_widget(Paragraph::new(line).block(block), area);
}
