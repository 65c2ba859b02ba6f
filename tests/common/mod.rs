//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::Router;
use parking_lot::Mutex;
use serde_json::Value;

use gemini_mcp::auth::{Credential, CredentialResolver};
use gemini_mcp::config::ConfigResolver;
use gemini_mcp::env::fixed_env;
use gemini_mcp::gemini::{
    ClientFactory, GenerateContentRequest, GenerateContentResponse, ModelClient,
};
use gemini_mcp::mcp::GeminiHandler;
use gemini_mcp::server::{AppState, HttpServer};
use gemini_mcp::tools::GeminiTools;
use gemini_mcp::{Result, TransportMode};

/// A call the fake provider received
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub api_key: String,
    pub request: GenerateContentRequest,
}

/// Fake provider: each client answers with the key it was built for
#[derive(Default)]
pub struct EchoKeyFactory {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    delay: Option<Duration>,
}

impl EchoKeyFactory {
    /// Clients sleep for `delay` before answering
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }
}

impl ClientFactory for EchoKeyFactory {
    fn create(&self, credential: Credential) -> Arc<dyn ModelClient> {
        Arc::new(EchoKeyClient {
            api_key: credential.expose().to_string(),
            calls: Arc::clone(&self.calls),
            delay: self.delay,
        })
    }
}

struct EchoKeyClient {
    api_key: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    delay: Option<Duration>,
}

#[async_trait]
impl ModelClient for EchoKeyClient {
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.calls.lock().push(RecordedCall {
            api_key: self.api_key.clone(),
            request,
        });
        Ok(GenerateContentResponse::from_text(format!(
            "key={}",
            self.api_key
        )))
    }
}

/// Fake provider that always returns the same response
pub struct FixedResponseFactory(pub GenerateContentResponse);

impl ClientFactory for FixedResponseFactory {
    fn create(&self, _credential: Credential) -> Arc<dyn ModelClient> {
        Arc::new(FixedResponseClient(self.0.clone()))
    }
}

struct FixedResponseClient(GenerateContentResponse);

#[async_trait]
impl ModelClient for FixedResponseClient {
    async fn generate_content(
        &self,
        _request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        Ok(self.0.clone())
    }
}

/// Handler in `mode` backed by `factory` and a fixed environment
pub fn handler(
    mode: TransportMode,
    factory: Arc<dyn ClientFactory>,
    vars: &[(&str, &str)],
) -> GeminiHandler {
    let env = fixed_env(vars.iter().copied());
    GeminiHandler::new(GeminiTools::new(
        CredentialResolver::new(mode, env.clone(), factory),
        Arc::new(ConfigResolver::new(env)),
    ))
}

/// HTTP router mounted at `/mcp`
pub fn router(factory: Arc<dyn ClientFactory>) -> Router {
    let handler = handler(TransportMode::StreamableHttp, factory, &[]);
    HttpServer::router(
        AppState::new(Arc::new(handler), TransportMode::StreamableHttp),
        "/mcp",
    )
}

/// JSON-RPC `tools/call` body
pub fn tool_call(id: i64, name: &str, arguments: Value) -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": {"name": name, "arguments": arguments}
    })
}

/// POST a JSON body to `/mcp`, optionally with an Authorization header
pub fn mcp_post(authorization: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri("/mcp")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("valid request")
}

/// Collect a response body as JSON
pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}
