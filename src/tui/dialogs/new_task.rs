//! New task dialog

use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use super::DialogResult;
use crate::task::{format_threshold, parse_threshold};
use crate::tui::components::render_text_field;
use crate::tui::styles::Theme;

const FIELD_COUNT: usize = 3;
const DEFAULT_MIN: &str = "1d";
const DEFAULT_MAX: &str = "3d";

#[derive(Debug, Clone, PartialEq)]
pub struct NewTaskData {
    pub name: String,
    pub min_threshold: i64,
    pub max_threshold: i64,
}

pub struct NewTaskDialog {
    name: Input,
    min: Input,
    max: Input,
    focused_field: usize,
    error_message: Option<String>,
}

impl Default for NewTaskDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl NewTaskDialog {
    pub fn new() -> Self {
        Self {
            name: Input::default(),
            min: Input::new(DEFAULT_MIN.to_string()),
            max: Input::new(DEFAULT_MAX.to_string()),
            focused_field: 0,
            error_message: None,
        }
    }

    /// Show an error from outside the dialog, e.g. a failed save.
    pub fn set_error(&mut self, error: String) {
        self.error_message = Some(error);
    }

    pub fn error(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult<NewTaskData> {
        match key.code {
            KeyCode::Esc => DialogResult::Cancel,
            KeyCode::Enter => match self.validate() {
                Ok(data) => {
                    self.error_message = None;
                    DialogResult::Submit(data)
                }
                Err(e) => {
                    self.error_message = Some(e);
                    DialogResult::Continue
                }
            },
            KeyCode::Tab | KeyCode::Down => {
                self.focused_field = (self.focused_field + 1) % FIELD_COUNT;
                DialogResult::Continue
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focused_field = (self.focused_field + FIELD_COUNT - 1) % FIELD_COUNT;
                DialogResult::Continue
            }
            _ => {
                self.current_input_mut().handle_event(&Event::Key(key));
                self.error_message = None;
                DialogResult::Continue
            }
        }
    }

    fn current_input_mut(&mut self) -> &mut Input {
        match self.focused_field {
            1 => &mut self.min,
            2 => &mut self.max,
            _ => &mut self.name,
        }
    }

    fn validate(&self) -> Result<NewTaskData, String> {
        let name = self.name.value().trim();
        if name.is_empty() {
            return Err("Task name cannot be empty".to_string());
        }

        let min_threshold =
            parse_threshold(self.min.value()).map_err(|e| format!("Minimum: {}", e))?;
        let max_threshold =
            parse_threshold(self.max.value()).map_err(|e| format!("Maximum: {}", e))?;
        if min_threshold >= max_threshold {
            return Err("Minimum must be less than maximum".to_string());
        }

        Ok(NewTaskData {
            name: name.to_string(),
            min_threshold,
            max_threshold,
        })
    }

    /// Normalized reading of a threshold field, if it parses.
    fn threshold_note(input: &Input) -> Option<String> {
        parse_threshold(input.value())
            .ok()
            .map(|secs| format!("= {}", format_threshold(secs)))
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = super::centered_rect(area, 60, 11);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .style(Style::default().bg(theme.background))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(" New Task ")
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(1),
            ])
            .split(inner);

        let min_note = Self::threshold_note(&self.min);
        let max_note = Self::threshold_note(&self.max);
        let fields: [(&str, &Input, Option<&str>); FIELD_COUNT] = [
            ("Name:", &self.name, None),
            ("Min:", &self.min, min_note.as_deref()),
            ("Max:", &self.max, max_note.as_deref()),
        ];
        for (idx, (label, input, note)) in fields.into_iter().enumerate() {
            render_text_field(
                frame,
                chunks[idx],
                label,
                input,
                idx == self.focused_field,
                note,
                theme,
            );
        }

        let footer = if let Some(error) = &self.error_message {
            Line::from(vec![
                Span::styled("✗ ", Style::default().fg(theme.error).bold()),
                Span::styled(error.as_str(), Style::default().fg(theme.error)),
            ])
        } else {
            Line::from(vec![
                Span::styled("Tab", Style::default().fg(theme.hint)),
                Span::raw(" next  "),
                Span::styled("Enter", Style::default().fg(theme.hint)),
                Span::raw(" create  "),
                Span::styled("Esc", Style::default().fg(theme.hint)),
                Span::raw(" cancel   "),
                Span::styled("e.g. 90m, 12h, 2d, 1w", Style::default().fg(theme.dimmed)),
            ])
        };
        frame.render_widget(Paragraph::new(footer), chunks[3]);
    }
}
