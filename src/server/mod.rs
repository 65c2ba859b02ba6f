//! Streamable HTTP transport
//!
//! Serves MCP JSON-RPC over `POST {path}` behind the Auth Gate, plus a public
//! landing page at `/` and a `/health` probe.

mod pages;
mod trace;

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::auth::{require_bearer, RequestAuthState, RequestContext};
use crate::auth::UNAUTHENTICATED_PATH;
use crate::error::{GeminiMcpError, Result};
use crate::mcp::{McpHandler, McpRequest, McpResponse};
use crate::transport::TransportMode;

pub use pages::landing_page;
pub use trace::trace_request;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_PATH: &str = "/mcp";

/// Shared router state
#[derive(Clone)]
pub struct AppState {
    handler: Arc<dyn McpHandler>,
    mode: TransportMode,
}

impl AppState {
    pub fn new(handler: Arc<dyn McpHandler>, mode: TransportMode) -> Self {
        Self { handler, mode }
    }
}

/// Where the HTTP server listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl HttpServerConfig {
    /// Build a config, adding a leading `/` to `path` when missing
    ///
    /// The MCP endpoint cannot live at `/`: the gate lets every request to
    /// that path through unauthenticated.
    pub fn new(host: impl Into<String>, port: u16, path: &str) -> Result<Self> {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        if path == UNAUTHENTICATED_PATH {
            return Err(GeminiMcpError::Config(format!(
                "MCP path must not be '{}'",
                UNAUTHENTICATED_PATH
            )));
        }
        Ok(Self {
            host: host.into(),
            port,
            path,
        })
    }
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            path: DEFAULT_PATH.to_string(),
        }
    }
}

/// HTTP server for the streamable-http transport
pub struct HttpServer {
    state: AppState,
    config: HttpServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(handler: Arc<dyn McpHandler>, config: HttpServerConfig) -> Self {
        Self {
            state: AppState::new(handler, TransportMode::StreamableHttp),
            config,
        }
    }

    /// Build the router
    pub fn router(state: AppState, path: &str) -> Router {
        Router::new()
            .route("/", get(pages::landing_page))
            .route("/health", get(health_handler))
            .route(path, post(mcp_handler))
            .layer(middleware::from_fn(require_bearer))
            .layer(TraceLayer::new_for_http())
            .layer(middleware::from_fn(trace::trace_request))
            .with_state(state)
    }

    /// Start the server
    pub async fn start(self) -> Result<()> {
        let app = Self::router(self.state, &self.config.path);
        let listener =
            tokio::net::TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;

        tracing::info!(
            "MCP server listening on http://{}{}",
            listener.local_addr()?,
            self.config.path
        );

        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Health check endpoint
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "transport": state.mode.as_str(),
    }))
}

/// MCP JSON-RPC endpoint
///
/// The auth state the gate stored on this request becomes the tool call's
/// context; nothing outlives the request.
async fn mcp_handler(
    State(state): State<AppState>,
    auth: Option<Extension<RequestAuthState>>,
    body: Bytes,
) -> Response {
    let request: McpRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            let error = McpResponse::from_error(None, e.into());
            return (StatusCode::BAD_REQUEST, Json(error)).into_response();
        }
    };

    let auth = auth.map(|Extension(auth)| auth).unwrap_or_default();
    tracing::debug!(method = %request.method, "mcp request");

    match state
        .handler
        .handle_request(request, RequestContext::http(auth))
        .await
    {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
