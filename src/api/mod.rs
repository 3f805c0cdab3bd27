//! Backend REST surface for configuration management

mod http;

pub use http::{HttpConfigApi, HttpConfigApiConfig};

use async_trait::async_trait;

use crate::model::{Category, ConfigPayload, ConfigRecord, PortsInfo, StatusSnapshot, TestOutcome};

/// Errors talking to the configuration backend
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {message}")]
    Network { message: String },

    /// Non-success response; `detail` is the backend's own message
    #[error("{detail}")]
    Rejected { status: u16, detail: String },

    #[error("Failed to parse response: {message}")]
    Decode { message: String },

    #[error("{category} does not support {operation}")]
    Unsupported {
        category: Category,
        operation: &'static str,
    },
}

impl ApiError {
    /// Text for the user: backend messages verbatim, everything else generic
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { detail, .. } if !detail.is_empty() => detail.clone(),
            ApiError::Unsupported { .. } => self.to_string(),
            _ => "Request failed. Check that the backend is reachable and try again.".to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode {
                message: e.to_string(),
            }
        } else {
            ApiError::Network {
                message: e.to_string(),
            }
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Operations the console performs against the backend
#[async_trait]
pub trait ConfigApi: Send + Sync {
    async fn status(&self) -> ApiResult<StatusSnapshot>;

    async fn ports(&self) -> ApiResult<PortsInfo>;

    async fn list(&self, category: Category) -> ApiResult<Vec<ConfigRecord>>;

    async fn create(&self, category: Category, payload: &ConfigPayload) -> ApiResult<ConfigRecord>;

    async fn update(&self, category: Category, id: &str, payload: &ConfigPayload) -> ApiResult<ConfigRecord>;

    async fn delete(&self, category: Category, id: &str) -> ApiResult<()>;

    /// Make `id` the active record, implicitly deactivating the previous one
    async fn activate(&self, category: Category, id: &str) -> ApiResult<()>;

    /// Live connection test using stored, env-resolved settings
    async fn test_saved(&self, category: Category, id: &str) -> ApiResult<TestOutcome>;

    /// Live connection test using an unsaved form payload
    async fn test_draft(&self, category: Category, payload: &ConfigPayload) -> ApiResult<TestOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_verbatim_for_rejections() {
        let err = ApiError::Rejected {
            status: 400,
            detail: "Model 'gpt-9' not found".to_string(),
        };
        assert_eq!(err.user_message(), "Model 'gpt-9' not found");
    }

    #[test]
    fn test_user_message_generic_for_network() {
        let err = ApiError::Network {
            message: "connection refused".to_string(),
        };
        assert!(!err.user_message().contains("connection refused"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_unsupported_display() {
        let err = ApiError::Unsupported {
            category: Category::Search,
            operation: "connection tests",
        };
        assert_eq!(err.to_string(), "search does not support connection tests");
    }
}
