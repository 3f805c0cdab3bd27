// Action dispatch and backend result handling

use crossterm::event::{Event, KeyCode, KeyModifiers};

use super::{App, AppEvent};
use crate::action::Action;
use crate::components::confirm_dialog::PendingDelete;
use crate::components::Component;
use crate::form::{ConfigForm, FormField};
use crate::panel::{CategoryPanel, Feedback, PanelTicket};

impl App {
    pub(super) fn handle_event(&self, event: &Event) -> Option<Action> {
        if let Event::Key(key) = event {
            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                return Some(Action::Quit);
            }
        }
        if self.confirm.is_visible() {
            return self.confirm.handle_event(event);
        }
        self.settings.handle_event(event)
    }

    pub(super) fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Tick => {
                if self.notifications.tick() {
                    self.mark_dirty();
                }
            }
            Action::NextCategory | Action::PrevCategory => {
                if self.settings.switch_category(action == Action::NextCategory) {
                    let panel = self.settings.panel_mut();
                    if !panel.is_loaded() {
                        let ticket = panel.start_load();
                        self.spawn_optional(ticket);
                    }
                }
            }
            Action::SelectNext => self.settings.panel_mut().select_next(),
            Action::SelectPrev => self.settings.panel_mut().select_prev(),
            Action::Reload => {
                let ticket = self.settings.panel_mut().start_load();
                self.spawn_optional(ticket);
                self.refresh_status();
            }
            Action::BeginAdd => {
                self.settings.panel_mut().begin_add();
            }
            Action::BeginEdit => {
                let panel = self.settings.panel_mut();
                let is_default = panel.selected_record().is_some_and(|r| r.is_default);
                if !panel.begin_edit() && is_default {
                    self.notifications.info("Default configurations cannot be edited");
                }
            }
            Action::RequestDelete => {
                let category = self.settings.current_category();
                if let Some(record) = self.settings.panel().delete_candidate() {
                    let pending = PendingDelete {
                        category,
                        id: record.id.clone(),
                        name: record.name.clone(),
                    };
                    self.confirm.show(pending);
                }
            }
            Action::ConfirmDelete => {
                if let Some(pending) = self.confirm.take() {
                    let ticket = self.settings.panel_for_mut(pending.category).start_delete(&pending.id);
                    self.spawn_optional(ticket);
                }
            }
            Action::RejectDelete => {
                self.confirm.take();
            }
            Action::Activate => {
                let ticket = self.settings.panel_mut().start_activate();
                self.spawn_optional(ticket);
            }
            Action::Test => self.start_checked(CategoryPanel::start_test),
            Action::Save => self.start_checked(CategoryPanel::start_save),
            Action::Cancel => self.settings.panel_mut().cancel(),
            Action::FormNextField => self.with_form(ConfigForm::select_next_field),
            Action::FormPrevField => self.with_form(ConfigForm::select_prev_field),
            Action::FormInput(c) => self.with_form(|form| form.input_char(c)),
            Action::FormPaste(text) => self.with_form(|form| form.paste(&text)),
            Action::FormBackspace => self.with_form(ConfigForm::backspace),
            Action::FormClear => self.with_form(ConfigForm::clear_selected),
            Action::FormCycle(forward) => self.with_form(|form| form.cycle_selected(forward)),
            Action::FormToggleEnv => {
                let mut unavailable = false;
                self.with_form(|form| {
                    unavailable = !form.toggle_env_selected() && form.selected_field() == FormField::Credential;
                });
                if unavailable {
                    self.notifications
                        .warning_with_message("API key", "Local providers do not use an API key");
                }
            }
            Action::FormToggleReveal => self.with_form(|form| form.show_credential = !form.show_credential),
            Action::CycleTheme => {
                if let Err(e) = self.prefs.update(|p| p.theme = p.theme.next()) {
                    tracing::error!("Failed to save preferences: {}", e);
                    self.notifications.error_with_message("Preferences", e.to_string());
                }
            }
            Action::ToggleLanguage => {
                if let Err(e) = self.prefs.update(|p| p.language = p.language.toggle()) {
                    tracing::error!("Failed to save preferences: {}", e);
                    self.notifications.error_with_message("Preferences", e.to_string());
                }
            }
            Action::DismissNotification => self.notifications.dismiss_first(),
        }
        self.mark_dirty();
    }

    fn spawn_optional(&self, ticket: Option<PanelTicket>) {
        if let Some(ticket) = ticket {
            self.spawn_ticket(ticket);
        }
    }

    /// Start a validated request; a validation failure is surfaced as a toast
    /// as well as the panel's inline feedback.
    fn start_checked(&mut self, start: fn(&mut CategoryPanel) -> Option<PanelTicket>) {
        let category = self.settings.current_category();
        let panel = self.settings.panel_mut();
        if panel.is_busy() {
            return;
        }
        panel.clear_feedback();
        match start(panel) {
            Some(ticket) => self.spawn_ticket(ticket),
            None => {
                if let Some(feedback) = panel.feedback().filter(|f| f.is_error()).cloned() {
                    self.notifications.feedback(category.label(), &feedback);
                }
            }
        }
    }

    fn with_form(&mut self, f: impl FnOnce(&mut ConfigForm)) {
        if let Some(form) = self.settings.panel_mut().form_mut() {
            f(form);
        }
    }

    pub(super) fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Panel {
                category,
                generation,
                outcome,
            } => {
                let effect = self.settings.panel_for_mut(category).apply(generation, outcome);
                if let Some(feedback) = &effect.feedback {
                    if !matches!(feedback, Feedback::Info(_)) {
                        self.notifications.feedback(category.label(), feedback);
                    }
                }
                if effect.refresh {
                    let ticket = self.settings.panel_for_mut(category).start_load();
                    self.spawn_optional(ticket);
                    self.refresh_status();
                }
            }
            AppEvent::Status(Ok(snapshot)) => self.status.set_snapshot(Some(snapshot)),
            AppEvent::Status(Err(e)) => {
                tracing::warn!("Failed to fetch status: {}", e);
                self.status.set_snapshot(None);
            }
            AppEvent::Ports(Ok(ports)) => self.status.set_ports(Some(ports)),
            AppEvent::Ports(Err(e)) => {
                tracing::warn!("Failed to fetch ports: {}", e);
                self.status.set_ports(None);
            }
        }
    }
}
