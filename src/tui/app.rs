//! Main TUI application

use anyhow::Result;
use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::time::{Duration, Instant};

use super::home::HomeView;
use super::styles::Theme;
use crate::store::{Config, Storage, TaskStore};

/// Input is polled this often so keys feel immediate between ticks.
const INPUT_POLL: Duration = Duration::from_millis(50);
/// Pick up edits made by the CLI while the dashboard is open.
const DISK_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

pub struct App {
    home: HomeView,
    should_quit: bool,
    theme: Theme,
    tick_interval: Duration,
}

impl App {
    pub fn new(profile: &str) -> Result<Self> {
        let config = Config::load().unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable config: {}", e);
            Config::default()
        });
        let store = TaskStore::open(Storage::new(profile)?);

        Ok(Self {
            home: HomeView::new(store, config.ui.clone()),
            should_quit: false,
            theme: Theme::default(),
            tick_interval: config.tick.interval(),
        })
    }

    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        terminal.clear()?;
        terminal.draw(|f| self.render(f))?;

        let mut last_tick = Instant::now();
        let mut last_disk_refresh = Instant::now();

        loop {
            if event::poll(INPUT_POLL)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);

                    // Draw immediately after input for responsiveness
                    terminal.draw(|f| self.render(f))?;

                    if self.should_quit {
                        break;
                    }
                    continue;
                }
            }

            let mut redraw = false;

            if last_disk_refresh.elapsed() >= DISK_REFRESH_INTERVAL {
                if !self.home.has_dialog() {
                    self.home.reload();
                    redraw = true;
                }
                last_disk_refresh = Instant::now();
            }

            if last_tick.elapsed() >= self.tick_interval {
                self.home.tick(Utc::now());
                last_tick = Instant::now();
                redraw = true;
            }

            if redraw {
                terminal.draw(|f| self.render(f))?;
            }
        }

        Ok(())
    }

    fn render(&self, frame: &mut Frame) {
        self.home.render(frame, frame.area(), &self.theme);
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Windows reports releases too
        if key.kind != KeyEventKind::Press {
            return;
        }

        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            self.should_quit = true;
            return;
        }

        match self.home.handle_key(key) {
            Some(Action::Quit) => self.should_quit = true,
            Some(Action::Reload) => self.home.reload(),
            None => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Reload,
}
