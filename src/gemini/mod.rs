//! Gemini API client
//!
//! Tools talk to the model through [`ModelClient`]. A [`ClientFactory`] builds
//! one client per resolved credential; [`GeminiClientFactory`] is the real
//! HTTP implementation against the Generative Language API.

mod types;

pub use types::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    GroundingChunk, GroundingMetadata, GroundingSupport, Part, Segment, WebChunk,
};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::auth::Credential;
use crate::error::{GeminiMcpError, Result};
use types::RequestBody;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// A model-provider client bound to one credential
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

/// Builds a client for a resolved credential
pub trait ClientFactory: Send + Sync {
    fn create(&self, credential: Credential) -> Arc<dyn ModelClient>;
}

/// Gemini REST client
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    credential: Credential,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, credential: Credential) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            credential,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            model
        )
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let body = RequestBody::from(&request);

        tracing::debug!(model = %request.model, "generateContent");

        let response = self
            .http
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", self.credential.expose())
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(GeminiMcpError::Provider {
                status: status.as_u16(),
                message: provider_message(&text),
            });
        }

        Ok(response.json().await?)
    }
}

/// Pull `error.message` out of a Google API error body, else return it raw
fn provider_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

/// Creates [`GeminiClient`]s sharing one connection pool
#[derive(Clone)]
pub struct GeminiClientFactory {
    http: reqwest::Client,
    base_url: String,
}

impl GeminiClientFactory {
    pub fn new(base_url: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for GeminiClientFactory {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ClientFactory for GeminiClientFactory {
    fn create(&self, credential: Credential) -> Arc<dyn ModelClient> {
        Arc::new(GeminiClient::new(
            self.http.clone(),
            self.base_url.clone(),
            credential,
        ))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GeminiClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9999/",
            Credential::new("k"),
        );
        assert_eq!(
            client.endpoint("gemini-2.5-pro"),
            "http://127.0.0.1:9999/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn test_provider_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(provider_message(body), "API key not valid.");
        assert_eq!(provider_message("upstream down"), "upstream down");
    }

    #[test]
    fn test_factory_default_base_url() {
        assert_eq!(GeminiClientFactory::default().base_url(), DEFAULT_BASE_URL);
    }
}
