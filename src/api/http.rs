use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiResult, ConfigApi};
use crate::model::record::{RecordList, RecordWire};
use crate::model::{Category, ConfigPayload, ConfigRecord, PortsInfo, StatusSnapshot, TestOutcome};

/// Connection settings for the configuration backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfigApiConfig {
    /// Base URL the `/config/...` paths hang off (e.g. "http://localhost:8000/api")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HttpConfigApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            timeout_secs: 30,
        }
    }
}

const SNIPPET_CHARS: usize = 200;

/// Leading part of a response body for messages, cut on a char boundary
fn snippet(text: &str) -> String {
    text.chars().take(SNIPPET_CHARS).collect()
}

/// reqwest-backed [`ConfigApi`]
pub struct HttpConfigApi {
    client: Client,
    base_url: String,
}

/// Error body shapes: `{"detail": "..."}` or `{"message": "..."}`
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

impl HttpConfigApi {
    pub fn new(config: &HttpConfigApiConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/config/{}", self.base_url, path)
    }

    fn record_url(&self, category: Category, id: &str) -> String {
        self.url(&format!("{}/{}", category, urlencoding::encode(id)))
    }

    /// Pass success responses through; turn everything else into `Rejected`
    async fn check(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let detail = Self::extract_detail(&text)
            .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
        tracing::debug!("Backend rejected request with {}: {}", status, detail);

        Err(ApiError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }

    fn extract_detail(text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        match serde_json::from_str::<ErrorBody>(trimmed) {
            Ok(body) => match (body.detail, body.message) {
                (Some(serde_json::Value::String(s)), _) => Some(s),
                (Some(other), _) if !other.is_null() => Some(other.to_string()),
                (_, Some(m)) => Some(m),
                _ => Some(snippet(trimmed)),
            },
            Err(_) => Some(snippet(trimmed)),
        }
    }

    async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> ApiResult<T> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            message: format!("{} - Response: {}", e, snippet(&text)),
        })
    }

    fn ensure_testable(category: Category) -> ApiResult<()> {
        if category.supports_test() {
            Ok(())
        } else {
            Err(ApiError::Unsupported {
                category,
                operation: "connection tests",
            })
        }
    }
}

#[async_trait]
impl ConfigApi for HttpConfigApi {
    async fn status(&self) -> ApiResult<StatusSnapshot> {
        let response = self.client.get(self.url("status")).send().await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn ports(&self) -> ApiResult<PortsInfo> {
        let response = self.client.get(self.url("ports")).send().await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn list(&self, category: Category) -> ApiResult<Vec<ConfigRecord>> {
        tracing::debug!("Fetching {} configurations", category);
        let response = self.client.get(self.url(category.as_str())).send().await?;
        let list: RecordList = Self::decode(Self::check(response).await?).await?;
        Ok(list.into_records(category))
    }

    async fn create(&self, category: Category, payload: &ConfigPayload) -> ApiResult<ConfigRecord> {
        let response = self
            .client
            .post(self.url(category.as_str()))
            .json(payload)
            .send()
            .await?;
        let wire: RecordWire = Self::decode(Self::check(response).await?).await?;
        Ok(wire.into_record(category))
    }

    async fn update(&self, category: Category, id: &str, payload: &ConfigPayload) -> ApiResult<ConfigRecord> {
        let response = self
            .client
            .put(self.record_url(category, id))
            .json(payload)
            .send()
            .await?;
        // PUT may answer with an acknowledgement instead of the record
        let text = Self::check(response).await?.text().await?;
        match serde_json::from_str::<RecordWire>(&text) {
            Ok(wire) => Ok(wire.into_record(category)),
            Err(_) => {
                tracing::debug!("Update of {} {} returned no record: {}", category, id, snippet(&text));
                Ok(ConfigRecord::from_payload(category, id, payload))
            }
        }
    }

    async fn delete(&self, category: Category, id: &str) -> ApiResult<()> {
        let response = self.client.delete(self.record_url(category, id)).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn activate(&self, category: Category, id: &str) -> ApiResult<()> {
        let url = format!("{}/active", self.record_url(category, id));
        let response = self.client.post(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn test_saved(&self, category: Category, id: &str) -> ApiResult<TestOutcome> {
        Self::ensure_testable(category)?;
        let url = format!("{}/test", self.record_url(category, id));
        let response = self.client.post(url).send().await?;
        Self::decode(Self::check(response).await?).await
    }

    async fn test_draft(&self, category: Category, payload: &ConfigPayload) -> ApiResult<TestOutcome> {
        Self::ensure_testable(category)?;
        let url = self.url(&format!("{}/test", category));
        let response = self.client.post(url).json(payload).send().await?;
        Self::decode(Self::check(response).await?).await
    }
}
