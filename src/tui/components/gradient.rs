//! Urgency gradient strip with a marker at the task's current position

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::tui::styles::Theme;
use crate::urgency::{compute_color, Rgb};

/// The strip runs a little past the maximum threshold so the black end shows.
const OVERSHOOT: f64 = 1.2;

/// One color per cell from zero elapsed to past the maximum threshold.
fn gradient_cells(width: u16, min: i64, max: i64) -> Vec<Rgb> {
    let span = max as f64 * OVERSHOOT;
    (0..width)
        .filter_map(|i| {
            let elapsed = span * (f64::from(i) + 0.5) / f64::from(width);
            compute_color(elapsed, min, max).ok()
        })
        .collect()
}

/// Cell under which the marker for `elapsed` sits, clamped to the strip.
fn marker_column(width: u16, max: i64, elapsed: f64) -> u16 {
    if width == 0 {
        return 0;
    }
    let span = max as f64 * OVERSHOOT;
    let fraction = if span > 0.0 { elapsed / span } else { 1.0 };
    let col = (fraction * f64::from(width)).floor();
    col.clamp(0.0, f64::from(width - 1)) as u16
}

/// Two rows: the gradient itself, then a `▲` under `elapsed`.
pub fn render_gradient(
    frame: &mut Frame,
    area: Rect,
    min: i64,
    max: i64,
    elapsed: f64,
    theme: &Theme,
) {
    if area.height < 2 || area.width == 0 {
        return;
    }

    let cells = gradient_cells(area.width, min, max);
    if cells.is_empty() {
        return;
    }

    let strip: Vec<Span> = cells
        .into_iter()
        .map(|rgb| Span::styled(" ", Style::default().bg(Color::from(rgb))))
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(strip)),
        Rect { height: 1, ..area },
    );

    let col = marker_column(area.width, max, elapsed);
    let marker = Line::from(vec![
        Span::raw(" ".repeat(col as usize)),
        Span::styled("▲", Style::default().fg(theme.accent).bold()),
    ]);
    frame.render_widget(
        Paragraph::new(marker),
        Rect {
            y: area.y + 1,
            height: 1,
            ..area
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::urgency::{BLACK, LIGHT_GREEN};

    #[test]
    fn test_gradient_runs_green_to_black() {
        let cells = gradient_cells(60, 100, 300);
        assert_eq!(cells.len(), 60);
        assert_eq!(cells[0], LIGHT_GREEN);
        assert_eq!(*cells.last().unwrap(), BLACK);
    }

    #[test]
    fn test_gradient_invalid_range_is_empty() {
        assert!(gradient_cells(60, 300, 100).is_empty());
    }

    #[test]
    fn test_marker_column() {
        assert_eq!(marker_column(120, 100, 0.0), 0);
        assert_eq!(marker_column(120, 100, 60.0), 60);
        assert_eq!(marker_column(120, 100, 1e9), 119);
        assert_eq!(marker_column(0, 100, 50.0), 0);
    }
}
