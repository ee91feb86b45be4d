//! Home view - task list colored by urgency, with a detail pane

use chrono::{DateTime, Local, Utc};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;
use unicode_width::UnicodeWidthStr;

use super::app::Action;
use super::components::{render_gradient, HelpOverlay};
use super::dialogs::{ConfirmDialog, DialogResult, InfoDialog, NewTaskData, NewTaskDialog};
use super::styles::Theme;
use crate::cli::truncate;
use crate::store::{TaskStore, UiConfig};
use crate::task::{format_elapsed, format_threshold, Task, TaskId};
use crate::urgency::{recolor, Urgency};

pub struct HomeView {
    store: TaskStore,
    urgencies: Vec<Urgency>,
    ui: UiConfig,

    // UI state
    cursor: usize,
    status_message: Option<String>,

    // Dialogs
    show_help: bool,
    new_dialog: Option<NewTaskDialog>,
    confirm_dialog: Option<ConfirmDialog>,
    info_dialog: Option<InfoDialog>,
    pending_delete: Option<TaskId>,
}

impl HomeView {
    pub fn new(store: TaskStore, ui: UiConfig) -> Self {
        let mut view = Self {
            store,
            urgencies: Vec::new(),
            ui,
            cursor: 0,
            status_message: None,
            show_help: false,
            new_dialog: None,
            confirm_dialog: None,
            info_dialog: None,
            pending_delete: None,
        };
        view.tick(Utc::now());
        view
    }

    /// Recompute every task's color for `now`.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        self.urgencies = recolor(self.store.tasks(), now);
    }

    /// Re-read the record, keeping the cursor on the same task when it still exists.
    pub fn reload(&mut self) {
        let selected = self.selected_task().map(|t| t.id().clone());
        self.store.load();

        self.cursor = selected
            .and_then(|id| self.store.tasks().iter().position(|t| *t.id() == id))
            .unwrap_or(self.cursor);
        self.clamp_cursor();
        self.tick(Utc::now());
    }

    pub fn has_dialog(&self) -> bool {
        self.show_help
            || self.new_dialog.is_some()
            || self.confirm_dialog.is_some()
            || self.info_dialog.is_some()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.store.tasks().get(self.cursor)
    }

    fn urgency_of(&self, id: &TaskId) -> Option<&Urgency> {
        self.urgencies.iter().find(|u| u.id == *id)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        // Handle dialog input first
        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return None;
        }

        if let Some(dialog) = &mut self.info_dialog {
            if let DialogResult::Cancel | DialogResult::Submit(()) = dialog.handle_key(key) {
                self.info_dialog = None;
            }
            return None;
        }

        if let Some(dialog) = &mut self.new_dialog {
            match dialog.handle_key(key) {
                DialogResult::Continue => {}
                DialogResult::Cancel => self.new_dialog = None,
                DialogResult::Submit(data) => self.create_task(data),
            }
            return None;
        }

        if let Some(dialog) = &mut self.confirm_dialog {
            match dialog.handle_key(key) {
                DialogResult::Continue => {}
                DialogResult::Cancel => {
                    self.confirm_dialog = None;
                    self.pending_delete = None;
                }
                DialogResult::Submit(()) => {
                    self.confirm_dialog = None;
                    if let Some(id) = self.pending_delete.take() {
                        self.delete_task(&id);
                    }
                }
            }
            return None;
        }

        self.status_message = None;

        match key.code {
            KeyCode::Char('q') => return Some(Action::Quit),
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('n') => self.new_dialog = Some(NewTaskDialog::new()),
            KeyCode::Char('d') | KeyCode::Delete => self.request_delete(),
            KeyCode::Enter | KeyCode::Char(' ') => self.reset_selected(),
            KeyCode::Char('r') | KeyCode::F(5) => return Some(Action::Reload),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-10),
            KeyCode::PageDown => self.move_cursor(10),
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => {
                self.cursor = self.store.len().saturating_sub(1);
            }
            _ => {}
        }

        None
    }

    fn move_cursor(&mut self, delta: i32) {
        let len = self.store.len();
        if len == 0 {
            return;
        }

        self.cursor = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (self.cursor + delta as usize).min(len - 1)
        };
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.store.len().saturating_sub(1));
    }

    fn create_task(&mut self, data: NewTaskData) {
        match self
            .store
            .add_task(&data.name, data.min_threshold, data.max_threshold)
        {
            Ok(_) => {
                self.new_dialog = None;
                self.cursor = self.store.len() - 1;
                self.tick(Utc::now());
            }
            Err(e) => {
                tracing::error!("Failed to add task: {}", e);
                if let Some(dialog) = &mut self.new_dialog {
                    dialog.set_error(e.to_string());
                }
            }
        }
    }

    fn reset_selected(&mut self) {
        let Some(id) = self.selected_task().map(|t| t.id().clone()) else {
            return;
        };

        match self.store.reset_task(&id) {
            Ok(task) => {
                self.tick(Utc::now());
                if self.ui.notify_on_reset {
                    self.info_dialog = Some(InfoDialog::new(
                        "Task Reset",
                        &format!(
                            "'{}' has been reset!\nSuccess count: {}",
                            task.name(),
                            task.success_count()
                        ),
                    ));
                } else {
                    self.status_message = Some(format!("✓ Reset '{}'", task.name()));
                }
            }
            Err(e) => {
                tracing::error!("Failed to reset task: {}", e);
                self.status_message = Some(format!("✗ {}", e));
            }
        }
    }

    fn request_delete(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let id = task.id().clone();

        if self.ui.confirm_delete {
            self.confirm_dialog = Some(ConfirmDialog::new(
                "Delete Task",
                &format!("Are you sure you want to delete '{}'?", task.name()),
            ));
            self.pending_delete = Some(id);
        } else {
            self.delete_task(&id);
        }
    }

    fn delete_task(&mut self, id: &TaskId) {
        match self.store.delete_task(id) {
            Ok(task) => {
                self.clamp_cursor();
                self.tick(Utc::now());
                self.status_message = Some(format!("✓ Deleted '{}'", task.name()));
            }
            Err(e) => {
                tracing::error!("Failed to delete task: {}", e);
                self.status_message = Some(format!("✗ {}", e));
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        // Layout: main area + status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);

        // Layout: task list and detail pane
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        self.render_list(frame, chunks[0], theme);
        self.render_detail(frame, chunks[1], theme);
        self.render_status_bar(frame, main_chunks[1], theme);

        // Render dialogs on top
        if self.show_help {
            HelpOverlay::render(frame, area, theme);
        }
        if let Some(dialog) = &self.new_dialog {
            dialog.render(frame, area, theme);
        }
        if let Some(dialog) = &self.confirm_dialog {
            dialog.render(frame, area, theme);
        }
        if let Some(dialog) = &self.info_dialog {
            dialog.render(frame, area, theme);
        }
    }

    fn render_list(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(format!(" Overdue [{}] ", self.store.storage().profile()))
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.store.is_empty() {
            let empty_text = vec![
                Line::from(""),
                Line::from("No tasks yet").style(Style::default().fg(theme.dimmed)),
                Line::from(""),
                Line::from("Press 'n' to add one").style(Style::default().fg(theme.hint)),
                Line::from("or 'overdue add <name> --min 1d --max 3d'")
                    .style(Style::default().fg(theme.hint)),
            ];
            let para = Paragraph::new(empty_text).alignment(Alignment::Center);
            frame.render_widget(para, inner);
            return;
        }

        let items: Vec<ListItem> = self
            .store
            .tasks()
            .iter()
            .enumerate()
            .map(|(idx, task)| self.render_item(task, idx == self.cursor, inner.width, theme))
            .collect();

        let mut state = ListState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(List::new(items), inner, &mut state);
    }

    fn render_item(&self, task: &Task, is_selected: bool, width: u16, theme: &Theme) -> ListItem<'_> {
        let Some(urgency) = self.urgency_of(task.id()) else {
            return ListItem::new(Line::from(Span::styled(
                task.name().to_string(),
                Style::default().fg(theme.dimmed),
            )));
        };

        let marker = if is_selected { "▶ " } else { "  " };
        let mut right = format_elapsed(urgency.elapsed);
        if self.ui.show_hex {
            right = format!("{}  {}", right, urgency.color.to_hex());
        }

        // Name gets whatever the marker and right-hand column leave over
        let width = width as usize;
        let name_width = width.saturating_sub(marker.width() + right.width() + 2);
        let name = truncate(task.name(), name_width);
        let gap = width.saturating_sub(marker.width() + name.width() + right.width() + 1);

        let line = Line::from(vec![
            Span::raw(marker),
            Span::raw(name),
            Span::raw(" ".repeat(gap)),
            Span::raw(right),
        ]);

        let mut style = Style::default()
            .fg(theme.row_text)
            .bg(Color::from(urgency.color));
        if is_selected {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        ListItem::new(line).style(style)
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Details ")
            .title_style(Style::default().fg(theme.title));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some((task, urgency)) = self
            .selected_task()
            .and_then(|t| self.urgency_of(t.id()).map(|u| (t, u)))
        else {
            let hint = Paragraph::new("Select a task to see details")
                .style(Style::default().fg(theme.dimmed))
                .alignment(Alignment::Center);
            frame.render_widget(hint, inner);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(0), Constraint::Length(2)])
            .split(inner);

        let label = Style::default().fg(theme.dimmed);
        let value = Style::default().fg(theme.text);
        let last_done: DateTime<Local> = task.last_updated().into();
        let row = |name: &'static str, text: String| {
            Line::from(vec![
                Span::styled(format!("{:<10}", name), label),
                Span::styled(text, value),
            ])
        };

        let lines = vec![
            Line::from(Span::styled(
                task.name().to_string(),
                Style::default().fg(theme.title).bold(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(format!("{:<10}", "Status"), label),
                Span::styled("  ", Style::default().bg(Color::from(urgency.color))),
                Span::styled(format!(" {} ({})", urgency.phase, urgency.color), value),
            ]),
            row("Elapsed", format_elapsed(urgency.elapsed)),
            row(
                "Window",
                format!(
                    "{} .. {}",
                    format_threshold(task.min_threshold()),
                    format_threshold(task.max_threshold())
                ),
            ),
            row("Done", format!("{} times", task.success_count())),
            row("Last done", last_done.format("%Y-%m-%d %H:%M").to_string()),
            row("ID", task.id().short().to_string()),
        ];
        frame.render_widget(Paragraph::new(lines), chunks[0]);

        render_gradient(
            frame,
            chunks[1],
            task.min_threshold(),
            task.max_threshold(),
            urgency.elapsed,
            theme,
        );
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if let Some(message) = &self.status_message {
            let color = if message.starts_with('✗') {
                theme.error
            } else {
                theme.success
            };
            let status = Paragraph::new(format!(" {}", message))
                .style(Style::default().fg(color).bg(theme.selection));
            frame.render_widget(status, area);
            return;
        }

        let key_style = Style::default().fg(theme.accent).bold();
        let desc_style = Style::default().fg(theme.dimmed);
        let sep_style = Style::default().fg(theme.border);

        let spans = vec![
            Span::styled(" j/k", key_style),
            Span::styled(" Navigate ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" Enter", key_style),
            Span::styled(" Done ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" n", key_style),
            Span::styled(" New ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" d", key_style),
            Span::styled(" Delete ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" ?", key_style),
            Span::styled(" Help ", desc_style),
            Span::styled("│", sep_style),
            Span::styled(" q", key_style),
            Span::styled(" Quit", desc_style),
        ];

        let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.selection));
        frame.render_widget(status, area);
    }
}
