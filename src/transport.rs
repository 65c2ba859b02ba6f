//! Transport mode
//!
//! Chosen once at startup and handed by value to everything that branches on
//! it. There is no way to switch transports while the server is running.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GeminiMcpError;

/// Channel the MCP server is running over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportMode {
    /// Newline-delimited JSON-RPC over stdin/stdout
    Stdio,
    /// JSON-RPC over HTTP POST, bearer-token authenticated
    #[default]
    StreamableHttp,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Stdio => "stdio",
            TransportMode::StreamableHttp => "streamable-http",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = GeminiMcpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "stdio" => Ok(TransportMode::Stdio),
            "streamable-http" => Ok(TransportMode::StreamableHttp),
            other => Err(GeminiMcpError::InvalidTransportMode(format!(
                "Invalid MCP_TRANSPORT_MODE: {}",
                other
            ))),
        }
    }
}
