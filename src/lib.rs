//! Gemini MCP - Gemini-backed tools over the Model Context Protocol
//!
//! Exposes `web_search` (Google Search grounded, with optional citations) and
//! `use_gemini` to MCP clients over stdio or bearer-authenticated streamable
//! HTTP.

pub mod auth;
pub mod config;
pub mod env;
pub mod error;
pub mod gemini;
pub mod grounding;
pub mod logging;
pub mod mcp;
pub mod server;
pub mod tools;
pub mod transport;

pub use error::{GeminiMcpError, Result};
pub use transport::TransportMode;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
