//! Form-editing representation of a configuration record
//!
//! Translates between wire records and the editable form while keeping the
//! literal/environment split intact:
//! - [`ConfigForm::decode_for_editing`] never pre-fills a credential
//! - [`ConfigForm::encode_for_submission`] emits either the literal text or
//!   the fixed environment variable for the (category, field) pair
//! - switching providers resets stale endpoint/credential state

mod secret;
mod validation;

pub use secret::SecretText;
pub use validation::{Purpose, ValidationError};

use crate::model::providers::{
    self, DEFAULT_EMBEDDING_DIMENSIONS, TTS_VOICES,
};
use crate::model::{Category, ConfigPayload, ConfigRecord, EnvField, EnvValue};

/// Editable fields, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Provider,
    Endpoint,
    Credential,
    Model,
    Dimensions,
    Voice,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Provider => "Provider",
            FormField::Endpoint => "Endpoint",
            FormField::Credential => "API Key",
            FormField::Model => "Model",
            FormField::Dimensions => "Dimensions",
            FormField::Voice => "Voice",
        }
    }

    /// Provider and voice are picked from fixed lists rather than typed
    pub fn is_selector(&self) -> bool {
        matches!(self, FormField::Provider | FormField::Voice)
    }
}

/// Endpoint input: literal text or the category's environment variable
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointInput {
    pub text: String,
    pub use_env: bool,
}

/// Credential input; write-only, never pre-filled from the backend
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialInput {
    pub text: SecretText,
    pub use_env: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigForm {
    category: Category,
    pub name: String,
    provider: String,
    pub endpoint: EndpointInput,
    pub credential: CredentialInput,
    pub model: String,
    pub dimensions: String,
    pub voice: String,
    /// Field under the cursor (index into [`ConfigForm::fields`])
    selected: usize,
    /// Credential shown in plain text instead of bullets
    pub show_credential: bool,
}

impl ConfigForm {
    /// Blank form for adding a record, pre-set to the first catalog provider
    pub fn new(category: Category) -> Self {
        let provider = providers::providers_for(category)
            .first()
            .map(|p| p.id)
            .unwrap_or_default();
        Self {
            category,
            name: String::new(),
            provider: provider.to_string(),
            endpoint: EndpointInput {
                text: providers::default_endpoint(category, provider).to_string(),
                use_env: false,
            },
            credential: CredentialInput::default(),
            model: String::new(),
            dimensions: if category.has_dimensions() {
                DEFAULT_EMBEDDING_DIMENSIONS.to_string()
            } else {
                String::new()
            },
            voice: if category.has_voice() {
                TTS_VOICES[0].to_string()
            } else {
                String::new()
            },
            selected: 0,
            show_credential: false,
        }
    }

    /// Build an edit form from a fetched record.
    ///
    /// Environment-backed fields decode to an empty display value with the
    /// env flag set. The credential display value is always empty.
    pub fn decode_for_editing(record: &ConfigRecord) -> Self {
        let category = record.category;
        let local = providers::is_local_provider(category, &record.provider);

        let endpoint = match &record.endpoint {
            Some(EnvValue::Environment(_)) if category.has_endpoint() => EndpointInput {
                text: String::new(),
                use_env: true,
            },
            Some(EnvValue::Literal(v)) if category.has_endpoint() => EndpointInput {
                text: v.clone(),
                use_env: false,
            },
            _ => EndpointInput::default(),
        };

        // Local providers cannot use the environment for their credential
        let credential = CredentialInput {
            text: SecretText::default(),
            use_env: !local && record.credential.as_ref().is_some_and(EnvValue::is_env),
        };

        Self {
            category,
            name: record.name.clone(),
            provider: record.provider.clone(),
            endpoint,
            credential,
            model: record.model.clone().unwrap_or_default(),
            dimensions: record
                .dimensions
                .map(|d| d.to_string())
                .unwrap_or_default(),
            voice: record.voice.clone().unwrap_or_default(),
            selected: 0,
            show_credential: false,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn is_local(&self) -> bool {
        providers::is_local_provider(self.category, &self.provider)
    }

    /// Variable name shown next to an env-backed field
    pub fn env_var_name(&self, field: EnvField) -> &'static str {
        self.category.env_var(field)
    }

    /// Switch provider, clearing state that must not leak across providers.
    ///
    /// Both env flags and the credential are always cleared. A local
    /// provider resets the endpoint to its default address; a remote one
    /// takes its suggested default only if the endpoint was blank or still
    /// the previous provider's default.
    pub fn select_provider(&mut self, provider: &str) {
        if provider == self.provider {
            return;
        }
        let previous_default = providers::default_endpoint(self.category, &self.provider);
        let next_default = providers::default_endpoint(self.category, provider);
        let local = providers::is_local_provider(self.category, provider);

        self.endpoint.use_env = false;
        self.credential.use_env = false;
        self.credential.text.clear();

        if self.category.has_endpoint() {
            let untouched = self.endpoint.text.is_empty() || self.endpoint.text == previous_default;
            if local || untouched {
                self.endpoint.text = next_default.to_string();
            }
        }

        self.provider = provider.to_string();
    }

    /// Cycle to the next/previous catalog provider
    pub fn cycle_provider(&mut self, forward: bool) {
        let list = providers::providers_for(self.category);
        if list.is_empty() {
            return;
        }
        let idx = list.iter().position(|p| p.id == self.provider);
        let next = match (idx, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % list.len(),
            (Some(0), false) => list.len() - 1,
            (Some(i), false) => i - 1,
        };
        self.select_provider(list[next].id);
    }

    pub fn cycle_voice(&mut self, forward: bool) {
        if !self.category.has_voice() {
            return;
        }
        let idx = TTS_VOICES.iter().position(|v| *v == self.voice);
        let next = match (idx, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % TTS_VOICES.len(),
            (Some(0), false) => TTS_VOICES.len() - 1,
            (Some(i), false) => i - 1,
        };
        self.voice = TTS_VOICES[next].to_string();
    }

    /// Toggle environment use for the endpoint. Turning it on discards the
    /// literal text; turning it off leaves an empty literal to fill in.
    pub fn set_endpoint_env(&mut self, use_env: bool) {
        if !self.category.has_endpoint() {
            return;
        }
        self.endpoint.use_env = use_env;
        self.endpoint.text.clear();
    }

    /// Returns false when the option is unavailable (local providers)
    pub fn set_credential_env(&mut self, use_env: bool) -> bool {
        if use_env && self.is_local() {
            return false;
        }
        self.credential.use_env = use_env;
        self.credential.text.clear();
        true
    }

    /// Whether the "use environment" toggle is reachable for a field
    pub fn env_option_available(&self, field: FormField) -> bool {
        match field {
            FormField::Endpoint => self.category.has_endpoint(),
            FormField::Credential => !self.is_local(),
            _ => false,
        }
    }

    /// Fields shown for this category, in order
    pub fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![FormField::Name, FormField::Provider];
        if self.category.has_endpoint() {
            fields.push(FormField::Endpoint);
        }
        fields.push(FormField::Credential);
        if self.category.has_model() {
            fields.push(FormField::Model);
        }
        if self.category.has_dimensions() {
            fields.push(FormField::Dimensions);
        }
        if self.category.has_voice() {
            fields.push(FormField::Voice);
        }
        fields
    }

    /// Selected field, clamped to the last one when the field set shrank
    pub fn selected_field(&self) -> FormField {
        let fields = self.fields();
        fields
            .get(self.selected)
            .or_else(|| fields.last())
            .copied()
            .unwrap_or(FormField::Name)
    }

    pub fn select_next_field(&mut self) {
        self.selected = (self.selected + 1) % self.fields().len();
    }

    pub fn select_prev_field(&mut self) {
        let len = self.fields().len();
        self.selected = if self.selected == 0 { len - 1 } else { self.selected - 1 };
    }

    /// Type a character into the selected field; env-backed and selector
    /// fields ignore input.
    pub fn input_char(&mut self, c: char) {
        match self.selected_field() {
            FormField::Name => self.name.push(c),
            FormField::Endpoint if !self.endpoint.use_env => self.endpoint.text.push(c),
            FormField::Credential if !self.credential.use_env => self.credential.text.push(c),
            FormField::Model => self.model.push(c),
            FormField::Dimensions if c.is_ascii_digit() => self.dimensions.push(c),
            _ => {}
        }
    }

    pub fn paste(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            self.input_char(c);
        }
    }

    pub fn backspace(&mut self) {
        match self.selected_field() {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Endpoint if !self.endpoint.use_env => {
                self.endpoint.text.pop();
            }
            FormField::Credential if !self.credential.use_env => self.credential.text.pop(),
            FormField::Model => {
                self.model.pop();
            }
            FormField::Dimensions => {
                self.dimensions.pop();
            }
            _ => {}
        }
    }

    pub fn clear_selected(&mut self) {
        match self.selected_field() {
            FormField::Name => self.name.clear(),
            FormField::Endpoint if !self.endpoint.use_env => self.endpoint.text.clear(),
            FormField::Credential if !self.credential.use_env => self.credential.text.clear(),
            FormField::Model => self.model.clear(),
            FormField::Dimensions => self.dimensions.clear(),
            _ => {}
        }
    }

    /// Left/right on a selector field
    pub fn cycle_selected(&mut self, forward: bool) {
        match self.selected_field() {
            FormField::Provider => self.cycle_provider(forward),
            FormField::Voice => self.cycle_voice(forward),
            _ => {}
        }
    }

    /// Toggle env use on the selected field, if it has the option
    pub fn toggle_env_selected(&mut self) -> bool {
        match self.selected_field() {
            FormField::Endpoint if self.category.has_endpoint() => {
                let next = !self.endpoint.use_env;
                self.set_endpoint_env(next);
                true
            }
            FormField::Credential => {
                let next = !self.credential.use_env;
                self.set_credential_env(next)
            }
            _ => false,
        }
    }

    /// Client-side pre-flight checks. The backend re-validates.
    pub fn validate(&self, purpose: Purpose) -> Result<(), ValidationError> {
        if purpose == Purpose::Save && self.name.trim().is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if self.category.has_model() && self.model.trim().is_empty() {
            return Err(ValidationError::ModelRequired);
        }
        if !self.is_local() && !self.credential.use_env && self.credential.text.expose().trim().is_empty() {
            return Err(ValidationError::CredentialRequired {
                provider: self.provider.clone(),
            });
        }
        if self.category.has_endpoint() && !self.endpoint.use_env && self.endpoint.text.trim().is_empty() {
            return Err(ValidationError::EndpointRequired);
        }
        if self.category.has_dimensions() {
            let raw = self.dimensions.trim();
            if raw.is_empty() {
                return Err(ValidationError::DimensionsRequired);
            }
            match raw.parse::<u32>() {
                Ok(n) if n > 0 => {}
                _ => return Err(ValidationError::DimensionsInvalid(raw.to_string())),
            }
        }
        Ok(())
    }

    /// Payload for create/update/test requests
    pub fn encode_for_submission(&self) -> ConfigPayload {
        let category = self.category;

        let base_url = if category.has_endpoint() {
            Some(if self.endpoint.use_env {
                EnvValue::env(category.env_var(EnvField::Endpoint))
            } else {
                EnvValue::literal(self.endpoint.text.trim())
            })
        } else {
            None
        };

        let api_key = if !self.is_local() && self.credential.use_env {
            EnvValue::env(category.env_var(EnvField::Credential))
        } else {
            EnvValue::literal(self.credential.text.expose().trim())
        };

        let name = self.name.trim();
        let voice = self.voice.trim();

        ConfigPayload {
            name: (!name.is_empty()).then(|| name.to_string()),
            provider: self.provider.clone(),
            base_url,
            api_key,
            model: category.has_model().then(|| self.model.trim().to_string()),
            dimensions: if category.has_dimensions() {
                self.dimensions.trim().parse().ok()
            } else {
                None
            },
            voice: (category.has_voice() && !voice.is_empty()).then(|| voice.to_string()),
        }
    }
}
