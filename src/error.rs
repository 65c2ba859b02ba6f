//! Error types for gemini-mcp

use thiserror::Error;

use crate::auth::CredentialError;

/// Result type alias for gemini-mcp operations
pub type Result<T> = std::result::Result<T, GeminiMcpError>;

/// Main error type for gemini-mcp
#[derive(Error, Debug)]
pub enum GeminiMcpError {
    #[error(transparent)]
    Auth(#[from] CredentialError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    InvalidTransportMode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Gemini API error {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GeminiMcpError {
    /// Whether the error came from the caller's credential rather than the server
    pub fn is_auth(&self) -> bool {
        matches!(self, GeminiMcpError::Auth(_))
    }

    /// Get error code for MCP protocol
    pub fn code(&self) -> i64 {
        match self {
            GeminiMcpError::InvalidInput(_) => -32602,
            GeminiMcpError::Auth(_) => -32003,
            GeminiMcpError::Config(_) | GeminiMcpError::InvalidTransportMode(_) => -32002,
            GeminiMcpError::Serialization(_) => -32700,
            _ => -32000,
        }
    }
}
