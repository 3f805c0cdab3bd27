//! Per-category view state
//!
//! A panel is either listing records, adding one, or editing one. At most one
//! backend request is outstanding per panel; every request carries the panel
//! generation it was issued under so results for a form that has since been
//! closed are dropped on arrival.

use crate::api::{ApiError, ApiResult};
use crate::form::{ConfigForm, Purpose};
use crate::model::{Category, ConfigPayload, ConfigRecord, RecordAction, TestOutcome};

#[derive(Debug, Clone, PartialEq)]
pub enum PanelMode {
    Listing,
    Adding(ConfigForm),
    Editing { record_id: String, form: ConfigForm },
}

/// The one request a panel may have in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingOp {
    Loading,
    Saving,
    Testing,
    Deleting(String),
    Activating(String),
}

impl PendingOp {
    pub fn label(&self) -> &'static str {
        match self {
            PendingOp::Loading => "Loading...",
            PendingOp::Saving => "Saving...",
            PendingOp::Testing => "Testing connection...",
            PendingOp::Deleting(_) => "Deleting...",
            PendingOp::Activating(_) => "Activating...",
        }
    }
}

/// Inline message shown under the panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Info(String),
    Success(String),
    Error(String),
}

impl Feedback {
    pub fn message(&self) -> &str {
        match self {
            Feedback::Info(m) | Feedback::Success(m) | Feedback::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Feedback::Error(_))
    }
}

/// Work the app should run against the backend on the panel's behalf
#[derive(Debug, Clone, PartialEq)]
pub enum PanelRequest {
    Load,
    Create(ConfigPayload),
    Update { id: String, payload: ConfigPayload },
    Delete(String),
    Activate(String),
    TestSaved(String),
    TestDraft(ConfigPayload),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelTicket {
    pub category: Category,
    pub generation: u64,
    pub request: PanelRequest,
}

/// Backend result delivered back to the panel
#[derive(Debug)]
pub enum PanelOutcome {
    Loaded(ApiResult<Vec<ConfigRecord>>),
    Saved(ApiResult<ConfigRecord>),
    Deleted(ApiResult<()>),
    Activated(ApiResult<()>),
    Tested(ApiResult<TestOutcome>),
}

/// What applying an outcome means for the rest of the app
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PanelEffect {
    pub feedback: Option<Feedback>,
    /// A mutation succeeded: re-fetch the list and the status overview
    pub refresh: bool,
}

pub struct CategoryPanel {
    category: Category,
    mode: PanelMode,
    pending: Option<PendingOp>,
    generation: u64,
    records: Vec<ConfigRecord>,
    selected: usize,
    feedback: Option<Feedback>,
    loaded: bool,
}

impl CategoryPanel {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            mode: PanelMode::Listing,
            pending: None,
            generation: 0,
            records: Vec::new(),
            selected: 0,
            feedback: None,
            loaded: false,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn mode(&self) -> &PanelMode {
        &self.mode
    }

    pub fn pending(&self) -> Option<&PendingOp> {
        self.pending.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn records(&self) -> &[ConfigRecord] {
        &self.records
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn clear_feedback(&mut self) {
        self.feedback = None;
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&ConfigRecord> {
        self.records.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.records.is_empty() {
            self.selected = (self.selected + 1) % self.records.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.records.is_empty() {
            self.selected = if self.selected == 0 {
                self.records.len() - 1
            } else {
                self.selected - 1
            };
        }
    }

    /// Actions offered for the selected record; nothing while a request is out
    pub fn available_actions(&self) -> Vec<RecordAction> {
        if self.is_busy() || !matches!(self.mode, PanelMode::Listing) {
            return Vec::new();
        }
        self.selected_record()
            .map(ConfigRecord::available_actions)
            .unwrap_or_default()
    }

    pub fn form(&self) -> Option<&ConfigForm> {
        match &self.mode {
            PanelMode::Adding(form) | PanelMode::Editing { form, .. } => Some(form),
            PanelMode::Listing => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut ConfigForm> {
        match &mut self.mode {
            PanelMode::Adding(form) | PanelMode::Editing { form, .. } => Some(form),
            PanelMode::Listing => None,
        }
    }

    fn ticket(&self, request: PanelRequest) -> PanelTicket {
        PanelTicket {
            category: self.category,
            generation: self.generation,
            request,
        }
    }

    fn enter(&mut self, mode: PanelMode) {
        self.generation += 1;
        self.mode = mode;
        self.feedback = None;
    }

    pub fn begin_add(&mut self) -> bool {
        if self.is_busy() || !matches!(self.mode, PanelMode::Listing) {
            return false;
        }
        self.enter(PanelMode::Adding(ConfigForm::new(self.category)));
        true
    }

    pub fn begin_edit(&mut self) -> bool {
        if self.is_busy() || !matches!(self.mode, PanelMode::Listing) {
            return false;
        }
        let Some(record) = self.selected_record().filter(|r| r.can_edit()) else {
            return false;
        };
        let mode = PanelMode::Editing {
            record_id: record.id.clone(),
            form: ConfigForm::decode_for_editing(record),
        };
        self.enter(mode);
        true
    }

    /// Close the form. Any save or test still in flight becomes stale.
    pub fn cancel(&mut self) {
        if matches!(self.mode, PanelMode::Listing) {
            return;
        }
        if matches!(self.pending, Some(PendingOp::Saving | PendingOp::Testing)) {
            self.pending = None;
        }
        self.enter(PanelMode::Listing);
    }

    pub fn start_load(&mut self) -> Option<PanelTicket> {
        if self.is_busy() {
            return None;
        }
        self.pending = Some(PendingOp::Loading);
        Some(self.ticket(PanelRequest::Load))
    }

    /// Validate the open form and issue create/update. Validation failures
    /// become feedback and issue nothing.
    pub fn start_save(&mut self) -> Option<PanelTicket> {
        if self.is_busy() {
            return None;
        }
        let form = self.form()?;
        let checked = form
            .validate(Purpose::Save)
            .map(|()| form.encode_for_submission());
        let payload = match checked {
            Ok(payload) => payload,
            Err(e) => {
                self.feedback = Some(Feedback::Error(e.to_string()));
                return None;
            }
        };
        let request = match &self.mode {
            PanelMode::Adding(_) => PanelRequest::Create(payload),
            PanelMode::Editing { record_id, .. } => PanelRequest::Update {
                id: record_id.clone(),
                payload,
            },
            PanelMode::Listing => return None,
        };
        self.pending = Some(PendingOp::Saving);
        self.feedback = None;
        Some(self.ticket(request))
    }

    /// Test the open form's draft, or the selected record when listing
    pub fn start_test(&mut self) -> Option<PanelTicket> {
        if self.is_busy() || !self.category.supports_test() {
            return None;
        }
        let request = match &self.mode {
            PanelMode::Listing => {
                let record = self.selected_record().filter(|r| r.can_test())?;
                PanelRequest::TestSaved(record.id.clone())
            }
            PanelMode::Adding(form) | PanelMode::Editing { form, .. } => {
                match form.validate(Purpose::Test) {
                    Ok(()) => PanelRequest::TestDraft(form.encode_for_submission()),
                    Err(e) => {
                        let message = e.to_string();
                        self.feedback = Some(Feedback::Error(message));
                        return None;
                    }
                }
            }
        };
        self.pending = Some(PendingOp::Testing);
        self.feedback = None;
        Some(self.ticket(request))
    }

    /// Record the selected record would delete, if deletion is allowed.
    /// The caller confirms with the user before calling [`Self::start_delete`].
    pub fn delete_candidate(&self) -> Option<&ConfigRecord> {
        if self.is_busy() || !matches!(self.mode, PanelMode::Listing) {
            return None;
        }
        self.selected_record().filter(|r| r.can_delete())
    }

    pub fn start_delete(&mut self, id: &str) -> Option<PanelTicket> {
        if self.is_busy() || !matches!(self.mode, PanelMode::Listing) {
            return None;
        }
        self.records.iter().find(|r| r.id == id && r.can_delete())?;
        self.pending = Some(PendingOp::Deleting(id.to_string()));
        self.feedback = None;
        Some(self.ticket(PanelRequest::Delete(id.to_string())))
    }

    pub fn start_activate(&mut self) -> Option<PanelTicket> {
        if self.is_busy() || !matches!(self.mode, PanelMode::Listing) {
            return None;
        }
        let id = self.selected_record().filter(|r| r.can_activate())?.id.clone();
        self.pending = Some(PendingOp::Activating(id.clone()));
        self.feedback = None;
        Some(self.ticket(PanelRequest::Activate(id)))
    }

    /// Apply a backend result issued under `generation`
    pub fn apply(&mut self, generation: u64, outcome: PanelOutcome) -> PanelEffect {
        if generation != self.generation {
            tracing::debug!(
                "Dropping stale {} result (generation {} != {})",
                self.category,
                generation,
                self.generation
            );
            return PanelEffect::default();
        }
        self.pending = None;

        let effect = match outcome {
            PanelOutcome::Loaded(Ok(records)) => {
                self.replace_records(records);
                PanelEffect::default()
            }
            PanelOutcome::Loaded(Err(e)) => self.failed("load configurations", e),
            PanelOutcome::Saved(Ok(record)) => {
                tracing::info!("Saved {} configuration '{}'", self.category, record.name);
                self.enter(PanelMode::Listing);
                PanelEffect {
                    feedback: Some(Feedback::Success(format!("Saved '{}'", record.name))),
                    refresh: true,
                }
            }
            PanelOutcome::Saved(Err(e)) => self.failed("save configuration", e),
            PanelOutcome::Deleted(Ok(())) => {
                tracing::info!("Deleted {} configuration", self.category);
                PanelEffect {
                    feedback: Some(Feedback::Success("Configuration deleted".to_string())),
                    refresh: true,
                }
            }
            PanelOutcome::Deleted(Err(e)) => self.failed("delete configuration", e),
            PanelOutcome::Activated(Ok(())) => {
                tracing::info!("Activated {} configuration", self.category);
                PanelEffect {
                    feedback: Some(Feedback::Success("Configuration activated".to_string())),
                    refresh: true,
                }
            }
            PanelOutcome::Activated(Err(e)) => self.failed("activate configuration", e),
            PanelOutcome::Tested(Ok(outcome)) => {
                let message = if outcome.message.is_empty() {
                    if outcome.success {
                        "Connection succeeded".to_string()
                    } else {
                        "Connection failed".to_string()
                    }
                } else {
                    outcome.message
                };
                PanelEffect {
                    feedback: Some(if outcome.success {
                        Feedback::Success(message)
                    } else {
                        Feedback::Error(message)
                    }),
                    refresh: false,
                }
            }
            PanelOutcome::Tested(Err(e)) => self.failed("test connection", e),
        };

        if effect.feedback.is_some() {
            self.feedback = effect.feedback.clone();
        }
        effect
    }

    fn failed(&mut self, what: &str, e: ApiError) -> PanelEffect {
        tracing::error!("Failed to {} for {}: {}", what, self.category, e);
        PanelEffect {
            feedback: Some(Feedback::Error(e.user_message())),
            refresh: false,
        }
    }

    /// Replace the list wholesale, keeping the selection on the same id
    fn replace_records(&mut self, mut records: Vec<ConfigRecord>) {
        let active = records.iter().filter(|r| r.is_active).count();
        if active > 1 {
            tracing::warn!(
                "Backend reported {} active {} configurations; showing only the first",
                active,
                self.category
            );
            let mut seen = false;
            for record in records.iter_mut().filter(|r| r.is_active) {
                record.is_active = !seen;
                seen = true;
            }
        }

        let selected_id = self.selected_record().map(|r| r.id.clone());
        self.records = records;
        self.selected = selected_id
            .and_then(|id| self.records.iter().position(|r| r.id == id))
            .unwrap_or(0)
            .min(self.records.len().saturating_sub(1));
        self.loaded = true;
    }
}
