//! Labelled single-line text field

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use tui_input::Input;

use crate::tui::styles::Theme;

/// Label column width, so fields line up.
const LABEL_WIDTH: usize = 6;

/// Render `label`, the input value with an inverse-video cursor when focused,
/// and an optional dimmed `note` after the value.
pub fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    input: &Input,
    is_focused: bool,
    note: Option<&str>,
    theme: &Theme,
) {
    let (label_style, value_style) = if is_focused {
        (
            Style::default().fg(theme.accent).underlined(),
            Style::default().fg(theme.accent),
        )
    } else {
        (
            Style::default().fg(theme.text),
            Style::default().fg(theme.text),
        )
    };

    let value = input.value();
    let mut spans = vec![
        Span::styled(format!("{:<width$}", label, width = LABEL_WIDTH), label_style),
        Span::raw(" "),
    ];

    if is_focused {
        let cursor = input.visual_cursor();
        let before: String = value.chars().take(cursor).collect();
        let at: String = value
            .chars()
            .nth(cursor)
            .map(String::from)
            .unwrap_or_else(|| " ".to_string());
        let after: String = value.chars().skip(cursor + 1).collect();

        spans.push(Span::styled(before, value_style));
        spans.push(Span::styled(
            at,
            Style::default().fg(theme.background).bg(theme.accent),
        ));
        spans.push(Span::styled(after, value_style));
    } else {
        spans.push(Span::styled(value.to_string(), value_style));
    }

    if let Some(note) = note {
        spans.push(Span::styled(
            format!("  {}", note),
            Style::default().fg(theme.dimmed),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
