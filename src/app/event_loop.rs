// Event loop - run() and polling of background results and preferences

use std::time::{Duration, Instant};

use crossterm::event;

use super::{App, Tui};
use crate::action::Action;
use crate::config::Theme;
use crate::error::{ConsoleError, Result};

impl App {
    /// Drain finished backend calls. Returns true if any were processed.
    pub(super) fn poll_app_events(&mut self) -> bool {
        let mut processed = false;
        while let Ok(event) = self.event_rx.try_recv() {
            self.handle_app_event(event);
            processed = true;
        }
        processed
    }

    /// Pick up preference changes published through the context
    pub(super) fn poll_preferences(&mut self) -> bool {
        if !self.prefs_rx.has_changed().unwrap_or(false) {
            return false;
        }
        let prefs = *self.prefs_rx.borrow_and_update();
        self.theme = Theme::for_mode(prefs.theme);
        self.language = prefs.language;
        self.status.set_prefs(prefs);
        true
    }

    pub fn run(&mut self) -> Result<()> {
        let mut tui = Tui::enter()?;
        self.start();

        loop {
            // ---- 1. Poll non-input sources ----

            if self.poll_app_events() {
                self.mark_dirty();
            }

            if self.poll_preferences() {
                self.mark_dirty();
            }

            if self.last_tick.elapsed() >= self.tick_interval {
                self.dispatch(Action::Tick);
                self.last_tick = Instant::now();
            }

            if self.should_quit {
                break;
            }

            // ---- 2. Poll user input ----

            if event::poll(Duration::from_millis(16)).map_err(|e| ConsoleError::Terminal(e.to_string()))? {
                let event = event::read().map_err(|e| ConsoleError::Terminal(e.to_string()))?;
                self.mark_dirty();
                if let Some(action) = self.handle_event(&event) {
                    self.dispatch(action);
                }
            }

            if self.should_quit {
                break;
            }

            // ---- 3. Draw once if anything changed ----

            if self.needs_redraw {
                tui.terminal
                    .draw(|frame| self.draw(frame))
                    .map_err(|e| ConsoleError::Terminal(e.to_string()))?;
                self.needs_redraw = false;
            }
        }

        tracing::info!("Console closed");
        Ok(())
    }
}
