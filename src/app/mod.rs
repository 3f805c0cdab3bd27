// App module
// - mod.rs: App struct, terminal lifecycle, background request plumbing
// - event_loop.rs: run() loop and channel polling
// - rendering.rs: draw
// - handlers.rs: action dispatch and backend result handling

mod event_loop;
mod handlers;
mod rendering;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::{mpsc, watch};

use crate::api::{ApiResult, ConfigApi};
use crate::components::{ConfirmDialog, NotificationManager, SettingsScreen, StatusOverview};
use crate::config::Theme;
use crate::error::{ConsoleError, Result};
use crate::model::{Category, PortsInfo, StatusSnapshot};
use crate::panel::{PanelOutcome, PanelRequest, PanelTicket};
use crate::prefs::{Language, PreferenceContext, Preferences};

/// Results of background backend calls, delivered to the UI loop
#[derive(Debug)]
pub enum AppEvent {
    Panel {
        category: Category,
        generation: u64,
        outcome: PanelOutcome,
    },
    Status(ApiResult<StatusSnapshot>),
    Ports(ApiResult<PortsInfo>),
}

/// Raw-mode alternate screen, restored on drop
struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Tui {
    fn enter() -> Result<Self> {
        enable_raw_mode().map_err(|e| ConsoleError::Terminal(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
            .map_err(|e| ConsoleError::Terminal(e.to_string()))?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .map_err(|e| ConsoleError::Terminal(e.to_string()))?;
        Ok(Self { terminal })
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableBracketedPaste);
        let _ = self.terminal.show_cursor();
    }
}

pub struct App {
    api: Arc<dyn ConfigApi>,
    prefs: PreferenceContext,
    prefs_rx: watch::Receiver<Preferences>,
    theme: Theme,
    language: Language,
    settings: SettingsScreen,
    status: StatusOverview,
    confirm: ConfirmDialog,
    notifications: NotificationManager,
    event_tx: mpsc::UnboundedSender<AppEvent>,
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    tick_interval: Duration,
    last_tick: Instant,
    should_quit: bool,
    needs_redraw: bool,
}

impl App {
    pub fn new(api: Arc<dyn ConfigApi>, prefs: PreferenceContext, tick_interval: Duration) -> Self {
        let current = prefs.get();
        let prefs_rx = prefs.subscribe();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        Self {
            api,
            prefs,
            prefs_rx,
            theme: Theme::for_mode(current.theme),
            language: current.language,
            settings: SettingsScreen::new(),
            status: StatusOverview::new(current),
            confirm: ConfirmDialog::new(),
            notifications: NotificationManager::new(),
            event_tx,
            event_rx,
            tick_interval,
            last_tick: Instant::now(),
            should_quit: false,
            needs_redraw: true,
        }
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Initial fetch of every category list and the status overview
    pub fn start(&mut self) {
        let tickets: Vec<PanelTicket> = self
            .settings
            .panels_mut()
            .filter_map(|panel| panel.start_load())
            .collect();
        for ticket in tickets {
            self.spawn_ticket(ticket);
        }
        self.refresh_status();
    }

    /// Run a panel request in the background; the result comes back as
    /// [`AppEvent::Panel`] tagged with the issuing generation.
    fn spawn_ticket(&self, ticket: PanelTicket) {
        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        let PanelTicket {
            category,
            generation,
            request,
        } = ticket;
        tracing::debug!("Spawning {} request for {} (generation {})", request_name(&request), category, generation);

        tokio::spawn(async move {
            let outcome = match request {
                PanelRequest::Load => PanelOutcome::Loaded(api.list(category).await),
                PanelRequest::Create(payload) => PanelOutcome::Saved(api.create(category, &payload).await),
                PanelRequest::Update { id, payload } => {
                    PanelOutcome::Saved(api.update(category, &id, &payload).await)
                }
                PanelRequest::Delete(id) => PanelOutcome::Deleted(api.delete(category, &id).await),
                PanelRequest::Activate(id) => PanelOutcome::Activated(api.activate(category, &id).await),
                PanelRequest::TestSaved(id) => PanelOutcome::Tested(api.test_saved(category, &id).await),
                PanelRequest::TestDraft(payload) => PanelOutcome::Tested(api.test_draft(category, &payload).await),
            };
            // The receiver is gone once the app has quit
            let _ = tx.send(AppEvent::Panel {
                category,
                generation,
                outcome,
            });
        });
    }

    fn refresh_status(&mut self) {
        self.status.set_loading();
        let api = Arc::clone(&self.api);
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(AppEvent::Status(api.status().await));
            let _ = tx.send(AppEvent::Ports(api.ports().await));
        });
    }
}

fn request_name(request: &PanelRequest) -> &'static str {
    match request {
        PanelRequest::Load => "load",
        PanelRequest::Create(_) => "create",
        PanelRequest::Update { .. } => "update",
        PanelRequest::Delete(_) => "delete",
        PanelRequest::Activate(_) => "activate",
        PanelRequest::TestSaved(_) => "test",
        PanelRequest::TestDraft(_) => "test-draft",
    }
}
