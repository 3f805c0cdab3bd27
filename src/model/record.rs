//! Configuration records as fetched from the backend

use serde::{Deserialize, Deserializer};

use super::category::Category;
use super::env_value::EnvValue;
use super::payload::ConfigPayload;

/// One named provider configuration within a category
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigRecord {
    /// Backend-assigned, immutable
    pub id: String,
    pub category: Category,
    pub name: String,
    pub provider: String,
    pub endpoint: Option<EnvValue>,
    /// The backend never returns a stored literal secret; this is either
    /// absent, blank, or an environment reference.
    pub credential: Option<EnvValue>,
    pub model: Option<String>,
    pub dimensions: Option<u32>,
    pub voice: Option<String>,
    pub is_default: bool,
    pub is_active: bool,
}

/// Actions a record can offer in the list view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordAction {
    Edit,
    Delete,
    Activate,
    Test,
}

impl RecordAction {
    pub fn key_hint(&self) -> &'static str {
        match self {
            RecordAction::Edit => "e edit",
            RecordAction::Delete => "d delete",
            RecordAction::Activate => "a activate",
            RecordAction::Test => "t test",
        }
    }
}

impl ConfigRecord {
    /// Default records are system-seeded: never deleted or renamed
    pub fn can_edit(&self) -> bool {
        !self.is_default
    }

    pub fn can_delete(&self) -> bool {
        !self.is_default
    }

    pub fn can_activate(&self) -> bool {
        !self.is_active
    }

    pub fn can_test(&self) -> bool {
        self.category.supports_test()
    }

    pub fn available_actions(&self) -> Vec<RecordAction> {
        let mut actions = Vec::new();
        if self.can_edit() {
            actions.push(RecordAction::Edit);
        }
        if self.can_delete() {
            actions.push(RecordAction::Delete);
        }
        if self.can_activate() {
            actions.push(RecordAction::Activate);
        }
        if self.can_test() {
            actions.push(RecordAction::Test);
        }
        actions
    }

    /// Record as just submitted, for updates the backend acknowledges
    /// without echoing the record back. Literal credentials are dropped.
    pub fn from_payload(category: Category, id: &str, payload: &ConfigPayload) -> Self {
        ConfigRecord {
            id: id.to_string(),
            category,
            name: payload.name.clone().unwrap_or_default(),
            provider: payload.provider.clone(),
            endpoint: payload.base_url.clone().filter(|_| category.has_endpoint()),
            credential: Some(payload.api_key.clone()).filter(EnvValue::is_env),
            model: payload.model.clone().filter(|_| category.has_model()),
            dimensions: payload.dimensions.filter(|_| category.has_dimensions()),
            voice: payload.voice.clone().filter(|_| category.has_voice()),
            is_default: false,
            is_active: false,
        }
    }

    /// Endpoint text for list display
    pub fn endpoint_display(&self) -> String {
        match &self.endpoint {
            Some(EnvValue::Environment(name)) => format!("${}", name),
            Some(EnvValue::Literal(v)) if !v.is_empty() => v.clone(),
            _ => "-".to_string(),
        }
    }

    /// Credential summary for display; never reveals a literal
    pub fn credential_display(&self) -> String {
        match &self.credential {
            Some(EnvValue::Environment(name)) => format!("${}", name),
            Some(EnvValue::Literal(v)) if !v.is_empty() => "••••••••".to_string(),
            _ => "-".to_string(),
        }
    }
}

/// Record shape on the wire; category comes from the request path
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RecordWire {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub base_url: Option<EnvValue>,
    #[serde(default)]
    pub api_key: Option<EnvValue>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub dimensions: Option<u32>,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub is_active: bool,
}

impl RecordWire {
    pub fn into_record(self, category: Category) -> ConfigRecord {
        ConfigRecord {
            id: self.id,
            category,
            name: self.name,
            provider: self.provider,
            endpoint: if category.has_endpoint() { self.base_url } else { None },
            credential: self.api_key,
            model: if category.has_model() { self.model } else { None },
            dimensions: if category.has_dimensions() { self.dimensions } else { None },
            voice: if category.has_voice() { self.voice } else { None },
            is_default: self.is_default,
            is_active: self.is_active,
        }
    }
}

/// List responses come either as a bare array or wrapped in `configs`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RecordList {
    Bare(Vec<RecordWire>),
    Wrapped { configs: Vec<RecordWire> },
}

impl RecordList {
    pub fn into_records(self, category: Category) -> Vec<ConfigRecord> {
        let items = match self {
            RecordList::Bare(items) => items,
            RecordList::Wrapped { configs } => configs,
        };
        items.into_iter().map(|w| w.into_record(category)).collect()
    }
}

/// Ids arrive as strings or integers depending on the backend's storage
#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(i64),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(s) => s,
            WireId::Number(n) => n.to_string(),
        }
    }
}

fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    WireId::deserialize(deserializer).map(String::from)
}

pub(super) fn deserialize_optional_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<WireId>::deserialize(deserializer)?.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(category: Category, is_default: bool, is_active: bool) -> ConfigRecord {
        ConfigRecord {
            id: "1".to_string(),
            category,
            name: "primary".to_string(),
            provider: "openai".to_string(),
            endpoint: None,
            credential: None,
            model: None,
            dimensions: None,
            voice: None,
            is_default,
            is_active,
        }
    }

    #[test]
    fn test_parse_wire_record_with_env_fields() {
        let wire: RecordWire = serde_json::from_value(json!({
            "id": 7,
            "name": "cloud",
            "provider": "openai",
            "base_url": {"use_env": "LLM_HOST"},
            "api_key": {"use_env": "LLM_API_KEY"},
            "model": "gpt-4o",
            "is_active": true,
            "extra": "ignored"
        }))
        .unwrap();
        let rec = wire.into_record(Category::Llm);
        assert_eq!(rec.id, "7");
        assert_eq!(rec.endpoint, Some(EnvValue::env("LLM_HOST")));
        assert_eq!(rec.credential, Some(EnvValue::env("LLM_API_KEY")));
        assert_eq!(rec.model.as_deref(), Some("gpt-4o"));
        assert!(rec.is_active);
        assert!(!rec.is_default);
    }

    #[test]
    fn test_search_record_drops_endpoint_and_model() {
        let wire: RecordWire = serde_json::from_value(json!({
            "id": "s1",
            "name": "web",
            "provider": "tavily",
            "base_url": "http://ignored",
            "model": "ignored",
            "api_key": ""
        }))
        .unwrap();
        let rec = wire.into_record(Category::Search);
        assert_eq!(rec.endpoint, None);
        assert_eq!(rec.model, None);
    }

    #[test]
    fn test_record_list_shapes() {
        let bare: RecordList = serde_json::from_value(json!([{"id": "a"}, {"id": "b"}])).unwrap();
        assert_eq!(bare.into_records(Category::Tts).len(), 2);

        let wrapped: RecordList =
            serde_json::from_value(json!({"configs": [{"id": "a", "is_default": true}]})).unwrap();
        let records = wrapped.into_records(Category::Embedding);
        assert_eq!(records.len(), 1);
        assert!(records[0].is_default);
        assert_eq!(records[0].category, Category::Embedding);
    }

    #[test]
    fn test_default_record_hides_edit_and_delete() {
        let rec = record(Category::Llm, true, true);
        assert_eq!(rec.available_actions(), vec![RecordAction::Test]);
    }

    #[test]
    fn test_inactive_custom_record_offers_everything() {
        let rec = record(Category::Llm, false, false);
        assert_eq!(
            rec.available_actions(),
            vec![
                RecordAction::Edit,
                RecordAction::Delete,
                RecordAction::Activate,
                RecordAction::Test
            ]
        );
    }

    #[test]
    fn test_search_record_never_offers_test() {
        let rec = record(Category::Search, false, true);
        assert!(!rec.available_actions().contains(&RecordAction::Test));
    }

    #[test]
    fn test_from_payload_keeps_submitted_fields_but_no_literal_secret() {
        let payload = ConfigPayload {
            name: Some("cloud".to_string()),
            provider: "openai".to_string(),
            base_url: Some(EnvValue::literal("https://api.openai.com/v1")),
            api_key: EnvValue::literal("sk-secret"),
            model: Some("text-embedding-3-small".to_string()),
            dimensions: Some(1536),
            voice: None,
        };
        let record = ConfigRecord::from_payload(Category::Embedding, "7", &payload);
        assert_eq!(record.id, "7");
        assert_eq!(record.name, "cloud");
        assert_eq!(record.dimensions, Some(1536));
        assert_eq!(record.credential, None);

        let env_payload = ConfigPayload {
            api_key: EnvValue::env("SEARCH_API_KEY"),
            ..payload
        };
        let search = ConfigRecord::from_payload(Category::Search, "s", &env_payload);
        assert_eq!(search.credential, Some(EnvValue::env("SEARCH_API_KEY")));
        assert_eq!(search.endpoint, None);
        assert_eq!(search.model, None);
    }

    #[test]
    fn test_credential_display_never_reveals_literal() {
        let mut rec = record(Category::Llm, false, false);
        rec.credential = Some(EnvValue::literal("sk-secret"));
        assert!(!rec.credential_display().contains("sk-secret"));
        rec.credential = Some(EnvValue::env("LLM_API_KEY"));
        assert_eq!(rec.credential_display(), "$LLM_API_KEY");
        rec.credential = None;
        assert_eq!(rec.credential_display(), "-");
    }
}
