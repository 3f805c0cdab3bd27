//! Fixed provider catalog per category
//!
//! Local providers need no credential and default to a well-known address
//! on the local machine.

use super::category::Category;

/// Catalog entry for a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderInfo {
    pub id: &'static str,
    pub label: &'static str,
    pub local: bool,
    /// Default endpoint; empty for search providers
    pub default_endpoint: &'static str,
}

impl ProviderInfo {
    const fn remote(id: &'static str, label: &'static str, endpoint: &'static str) -> Self {
        Self {
            id,
            label,
            local: false,
            default_endpoint: endpoint,
        }
    }

    const fn local(id: &'static str, label: &'static str, endpoint: &'static str) -> Self {
        Self {
            id,
            label,
            local: true,
            default_endpoint: endpoint,
        }
    }
}

const LLM_PROVIDERS: &[ProviderInfo] = &[
    ProviderInfo::remote("openai", "OpenAI", "https://api.openai.com/v1"),
    ProviderInfo::remote("anthropic", "Anthropic", "https://api.anthropic.com/v1"),
    ProviderInfo::remote("gemini", "Google Gemini", "https://generativelanguage.googleapis.com/v1beta/openai"),
    ProviderInfo::remote("groq", "Groq", "https://api.groq.com/openai/v1"),
    ProviderInfo::remote("openrouter", "OpenRouter", "https://openrouter.ai/api/v1"),
    ProviderInfo::local("ollama", "Ollama", "http://localhost:11434/v1"),
    ProviderInfo::local("lmstudio", "LM Studio", "http://localhost:1234/v1"),
];

const EMBEDDING_PROVIDERS: &[ProviderInfo] = &[
    ProviderInfo::remote("openai", "OpenAI", "https://api.openai.com/v1"),
    ProviderInfo::remote("gemini", "Google Gemini", "https://generativelanguage.googleapis.com/v1beta/openai"),
    ProviderInfo::remote("voyage", "Voyage AI", "https://api.voyageai.com/v1"),
    ProviderInfo::local("ollama", "Ollama", "http://localhost:11434/v1"),
    ProviderInfo::local("lmstudio", "LM Studio", "http://localhost:1234/v1"),
];

const TTS_PROVIDERS: &[ProviderInfo] = &[
    ProviderInfo::remote("openai", "OpenAI", "https://api.openai.com/v1"),
    ProviderInfo::remote("elevenlabs", "ElevenLabs", "https://api.elevenlabs.io/v1"),
    ProviderInfo::local("kokoro", "Kokoro", "http://localhost:8880/v1"),
];

const SEARCH_PROVIDERS: &[ProviderInfo] = &[
    ProviderInfo::remote("tavily", "Tavily", ""),
    ProviderInfo::remote("serper", "Serper", ""),
    ProviderInfo::remote("brave", "Brave Search", ""),
    ProviderInfo::local("searxng", "SearXNG", ""),
];

/// Voices offered for text-to-speech records
pub const TTS_VOICES: &[&str] = &["alloy", "echo", "fable", "onyx", "nova", "shimmer"];

/// Vector size pre-filled into new embedding forms
pub const DEFAULT_EMBEDDING_DIMENSIONS: u32 = 1536;

/// Selectable providers for a category, in display order
pub fn providers_for(category: Category) -> &'static [ProviderInfo] {
    match category {
        Category::Llm => LLM_PROVIDERS,
        Category::Embedding => EMBEDDING_PROVIDERS,
        Category::Tts => TTS_PROVIDERS,
        Category::Search => SEARCH_PROVIDERS,
    }
}

pub fn find_provider(category: Category, id: &str) -> Option<&'static ProviderInfo> {
    providers_for(category).iter().find(|p| p.id == id)
}

/// Unknown providers are treated as remote
pub fn is_local_provider(category: Category, id: &str) -> bool {
    find_provider(category, id).map(|p| p.local).unwrap_or(false)
}

/// Default endpoint for a provider, empty when unknown or not applicable
pub fn default_endpoint(category: Category, id: &str) -> &'static str {
    if !category.has_endpoint() {
        return "";
    }
    find_provider(category, id)
        .map(|p| p.default_endpoint)
        .unwrap_or("")
}
