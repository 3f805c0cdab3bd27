//! Read-only status snapshots reported by the backend

use serde::Deserialize;

use super::category::Category;
use super::record::deserialize_optional_id;

/// Per-category service status
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServiceStatus {
    pub configured: bool,
    #[serde(deserialize_with = "deserialize_optional_id")]
    pub active_id: Option<String>,
    pub active_name: Option<String>,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub total: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatusSummary {
    pub configured: u32,
    pub total: u32,
}

/// Snapshot from `GET /config/status`; a missing category renders as unknown
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatusSnapshot {
    pub llm: Option<ServiceStatus>,
    pub embedding: Option<ServiceStatus>,
    pub tts: Option<ServiceStatus>,
    pub search: Option<ServiceStatus>,
    pub summary: Option<StatusSummary>,
}

impl StatusSnapshot {
    pub fn get(&self, category: Category) -> Option<&ServiceStatus> {
        match category {
            Category::Llm => self.llm.as_ref(),
            Category::Embedding => self.embedding.as_ref(),
            Category::Tts => self.tts.as_ref(),
            Category::Search => self.search.as_ref(),
        }
    }

    /// Summary as reported, or derived from the per-category entries
    pub fn summary(&self) -> StatusSummary {
        if let Some(summary) = &self.summary {
            return summary.clone();
        }
        let entries: Vec<_> = Category::ALL.iter().filter_map(|c| self.get(*c)).collect();
        StatusSummary {
            configured: entries.iter().filter(|s| s.configured).count() as u32,
            total: Category::ALL.len() as u32,
        }
    }
}

/// Informational port numbers from `GET /config/ports`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PortsInfo {
    pub backend: Option<u16>,
    pub frontend: Option<u16>,
}

/// Result of a live connection test
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TestOutcome {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_snapshot() {
        let snapshot: StatusSnapshot = serde_json::from_value(json!({
            "llm": {"configured": true, "active_name": "cloud", "provider": "openai", "model": "gpt-4o", "total": 2},
            "tts": {"configured": false}
        }))
        .unwrap();
        let llm = snapshot.get(Category::Llm).unwrap();
        assert!(llm.configured);
        assert_eq!(llm.total, 2);
        assert!(snapshot.get(Category::Embedding).is_none());
        assert!(!snapshot.get(Category::Tts).unwrap().configured);
    }

    #[test]
    fn test_active_id_accepts_numbers_and_strings() {
        let snapshot: StatusSnapshot = serde_json::from_value(json!({
            "llm": {"configured": true, "active_id": 1, "active_name": "default"},
            "tts": {"configured": true, "active_id": "t1"},
            "search": {"configured": false, "active_id": null}
        }))
        .unwrap();
        assert_eq!(snapshot.get(Category::Llm).unwrap().active_id.as_deref(), Some("1"));
        assert_eq!(snapshot.get(Category::Tts).unwrap().active_id.as_deref(), Some("t1"));
        assert_eq!(snapshot.get(Category::Search).unwrap().active_id, None);
    }

    #[test]
    fn test_summary_derived_when_missing() {
        let snapshot: StatusSnapshot = serde_json::from_value(json!({
            "llm": {"configured": true},
            "search": {"configured": true},
            "tts": {"configured": false}
        }))
        .unwrap();
        let summary = snapshot.summary();
        assert_eq!(summary.configured, 2);
        assert_eq!(summary.total, 4);
    }

    #[test]
    fn test_summary_reported() {
        let snapshot: StatusSnapshot =
            serde_json::from_value(json!({"summary": {"configured": 3, "total": 4}})).unwrap();
        assert_eq!(snapshot.summary().configured, 3);
    }

    #[test]
    fn test_outcome_message_optional() {
        let outcome: TestOutcome = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(outcome.success);
        assert!(outcome.message.is_empty());
    }

    #[test]
    fn test_ports() {
        let ports: PortsInfo = serde_json::from_value(json!({"backend": 8000})).unwrap();
        assert_eq!(ports.backend, Some(8000));
        assert_eq!(ports.frontend, None);
    }
}
