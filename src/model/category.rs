//! Configuration categories and their fixed per-category properties

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which indirection-eligible field an environment variable backs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvField {
    Endpoint,
    Credential,
}

/// One of the four configuration domains managed by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Llm,
    Embedding,
    Tts,
    Search,
}

impl Category {
    pub const ALL: &'static [Category] = &[
        Category::Llm,
        Category::Embedding,
        Category::Tts,
        Category::Search,
    ];

    /// Path segment and wire name (`llm`, `embedding`, `tts`, `search`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Llm => "llm",
            Category::Embedding => "embedding",
            Category::Tts => "tts",
            Category::Search => "search",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Llm => "LLM",
            Category::Embedding => "Embedding",
            Category::Tts => "Text-to-Speech",
            Category::Search => "Search",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Llm => "󰘦",
            Category::Embedding => "󰆼",
            Category::Tts => "󰗅",
            Category::Search => "󰍉",
        }
    }

    /// Fixed environment variable the backend resolves for an indirected field.
    /// Not user-editable.
    pub fn env_var(&self, field: EnvField) -> &'static str {
        match (self, field) {
            (Category::Llm, EnvField::Endpoint) => "LLM_HOST",
            (Category::Llm, EnvField::Credential) => "LLM_API_KEY",
            (Category::Embedding, EnvField::Endpoint) => "EMBEDDING_HOST",
            (Category::Embedding, EnvField::Credential) => "EMBEDDING_API_KEY",
            (Category::Tts, EnvField::Endpoint) => "TTS_URL",
            (Category::Tts, EnvField::Credential) => "TTS_API_KEY",
            (Category::Search, EnvField::Endpoint) => "SEARCH_PROVIDER",
            (Category::Search, EnvField::Credential) => "SEARCH_API_KEY",
        }
    }

    /// Search records carry neither an endpoint nor a model
    pub fn has_endpoint(&self) -> bool {
        !matches!(self, Category::Search)
    }

    pub fn has_model(&self) -> bool {
        !matches!(self, Category::Search)
    }

    pub fn has_dimensions(&self) -> bool {
        matches!(self, Category::Embedding)
    }

    pub fn has_voice(&self) -> bool {
        matches!(self, Category::Tts)
    }

    /// Connection tests (saved or ad-hoc) are not offered for search
    pub fn supports_test(&self) -> bool {
        !matches!(self, Category::Search)
    }

    pub fn next(&self) -> Category {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Category {
        let idx = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        if idx == 0 {
            Self::ALL[Self::ALL.len() - 1]
        } else {
            Self::ALL[idx - 1]
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "llm" => Ok(Category::Llm),
            "embedding" => Ok(Category::Embedding),
            "tts" => Ok(Category::Tts),
            "search" => Ok(Category::Search),
            other => Err(format!(
                "unknown category '{}' (expected llm, embedding, tts or search)",
                other
            )),
        }
    }
}
