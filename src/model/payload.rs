use serde::Serialize;

use super::env_value::EnvValue;

/// Body for create, update and ad-hoc test requests
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<EnvValue>,
    pub api_key: EnvValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_optional_fields_are_omitted() {
        let payload = ConfigPayload {
            name: None,
            provider: "tavily".to_string(),
            base_url: None,
            api_key: EnvValue::env("SEARCH_API_KEY"),
            model: None,
            dimensions: None,
            voice: None,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"provider": "tavily", "api_key": {"use_env": "SEARCH_API_KEY"}})
        );
    }

    #[test]
    fn test_full_payload_shape() {
        let payload = ConfigPayload {
            name: Some("embed".to_string()),
            provider: "openai".to_string(),
            base_url: Some(EnvValue::literal("https://api.openai.com/v1")),
            api_key: EnvValue::literal("sk-1"),
            model: Some("text-embedding-3-small".to_string()),
            dimensions: Some(1536),
            voice: None,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({
                "name": "embed",
                "provider": "openai",
                "base_url": "https://api.openai.com/v1",
                "api_key": "sk-1",
                "model": "text-embedding-3-small",
                "dimensions": 1536
            })
        );
    }
}
