//! Literal-or-environment field values
//!
//! On the wire a field is either a plain string or `{"use_env": "NAME"}`,
//! telling the backend to resolve the value from its own environment.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field that holds either a literal value or an environment reference.
/// The two forms never coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvValue {
    Literal(String),
    Environment(String),
}

impl EnvValue {
    pub fn literal(value: impl Into<String>) -> Self {
        EnvValue::Literal(value.into())
    }

    pub fn env(name: impl Into<String>) -> Self {
        EnvValue::Environment(name.into())
    }

    pub fn is_env(&self) -> bool {
        matches!(self, EnvValue::Environment(_))
    }
}

impl Default for EnvValue {
    fn default() -> Self {
        EnvValue::Literal(String::new())
    }
}

#[derive(Serialize, Deserialize)]
struct EnvRef {
    use_env: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireValue {
    Text(String),
    Env(EnvRef),
}

impl Serialize for EnvValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EnvValue::Literal(v) => serializer.serialize_str(v),
            EnvValue::Environment(name) => EnvRef {
                use_env: name.clone(),
            }
            .serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for EnvValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WireValue::deserialize(deserializer)? {
            WireValue::Text(v) => EnvValue::Literal(v),
            WireValue::Env(r) => EnvValue::Environment(r.use_env),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_literal_serializes_as_plain_string() {
        let value = EnvValue::literal("http://localhost:11434/v1");
        assert_eq!(serde_json::to_value(&value).unwrap(), json!("http://localhost:11434/v1"));
    }

    #[test]
    fn test_env_serializes_as_tagged_object() {
        let value = EnvValue::env("LLM_HOST");
        assert_eq!(serde_json::to_value(&value).unwrap(), json!({"use_env": "LLM_HOST"}));
    }

    #[test]
    fn test_deserialize_both_shapes() {
        let lit: EnvValue = serde_json::from_value(json!("sk-123")).unwrap();
        assert_eq!(lit, EnvValue::literal("sk-123"));

        let env: EnvValue = serde_json::from_value(json!({"use_env": "TTS_API_KEY"})).unwrap();
        assert_eq!(env, EnvValue::env("TTS_API_KEY"));
        assert!(env.is_env());
    }

    #[test]
    fn test_env_object_is_never_read_as_literal() {
        let value: EnvValue = serde_json::from_value(json!({"use_env": "LLM_API_KEY"})).unwrap();
        assert_eq!(value, EnvValue::env("LLM_API_KEY"));
        assert_ne!(value, EnvValue::literal("LLM_API_KEY"));
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(serde_json::from_value::<EnvValue>(json!(42)).is_err());
        assert!(serde_json::from_value::<EnvValue>(json!({"env": "X"})).is_err());
    }
}
