//! MCP (Model Context Protocol) server implementation
//!
//! JSON-RPC over stdio or streamable HTTP.

pub mod handler;
pub mod protocol;
pub mod tools;

pub use handler::GeminiHandler;
pub use protocol::{
    methods, InitializeResult, McpHandler, McpRequest, McpResponse, McpServer, ToolCallResult,
};
pub use tools::{get_tool_definitions, TOOL_DEFINITIONS};
