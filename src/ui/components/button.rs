//! Button component for TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Render a generic button with border
pub fn render_button(
    frame: &mut Frame,
    area: Rect,
    content: &str,
    is_selected: bool,
    is_enabled: bool,
    accent: Color,
) {
    let border_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(accent)
    };

    let text_style = if !is_enabled {
        Style::default().fg(Color::DarkGray)
    } else if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let paragraph = Paragraph::new(format!(" {content} "))
        .style(text_style)
        .alignment(Alignment::Center);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Render the form's submit button, showing `spinner` while submitting.
///
/// `is_ready` tints the border green once every field passes validation.
pub fn render_submit_button(
    frame: &mut Frame,
    area: Rect,
    is_selected: bool,
    is_ready: bool,
    spinner: Option<&str>,
) {
    let accent = if is_ready { Color::Green } else { Color::Blue };
    match spinner {
        Some(frame_glyph) => render_button(
            frame,
            area,
            &format!("{frame_glyph} Submitting..."),
            is_selected,
            false,
            accent,
        ),
        None => render_button(frame, area, "Submit", is_selected, true, accent),
    }
}
