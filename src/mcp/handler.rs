//! MCP request handler for the Gemini tools

use async_trait::async_trait;
use serde_json::{json, Value};

use super::protocol::{
    methods, InitializeResult, McpHandler, McpRequest, McpResponse, ToolCallResult,
};
use super::tools::{get_tool_definitions, USE_GEMINI, WEB_SEARCH};
use crate::auth::RequestContext;
use crate::error::Result;
use crate::tools::{parse_input, GeminiTools};

/// Routes JSON-RPC methods to the tools
#[derive(Clone)]
pub struct GeminiHandler {
    tools: GeminiTools,
}

impl GeminiHandler {
    pub fn new(tools: GeminiTools) -> Self {
        Self { tools }
    }

    /// Run a tool by name; `None` when no such tool exists
    async fn handle_tool_call(
        &self,
        name: &str,
        arguments: Value,
        ctx: &RequestContext,
    ) -> Option<Result<Value>> {
        let result = match name {
            WEB_SEARCH => match parse_input(name, arguments) {
                Ok(input) => self.tools.web_search(input, ctx).await,
                Err(e) => Err(e),
            },
            USE_GEMINI => match parse_input(name, arguments) {
                Ok(input) => self.tools.use_gemini(input, ctx).await,
                Err(e) => Err(e),
            },
            _ => return None,
        };
        Some(result)
    }
}

#[async_trait]
impl McpHandler for GeminiHandler {
    async fn handle_request(
        &self,
        request: McpRequest,
        ctx: RequestContext,
    ) -> Option<McpResponse> {
        if request.is_notification() || request.method.starts_with("notifications/") {
            tracing::debug!(method = %request.method, "notification");
            return None;
        }

        let response = match request.method.as_str() {
            methods::INITIALIZE => {
                let result = InitializeResult::for_client(&request.params);
                McpResponse::success(request.id, json!(result))
            }
            methods::PING => McpResponse::success(request.id, json!({})),
            methods::LIST_TOOLS => {
                let tools = get_tool_definitions();
                McpResponse::success(request.id, json!({"tools": tools}))
            }
            methods::CALL_TOOL => {
                let name = request
                    .params
                    .get("name")
                    .and_then(|v| v.as_str())
                    .unwrap_or("");
                let arguments = request
                    .params
                    .get("arguments")
                    .cloned()
                    .unwrap_or(json!({}));

                let tool_result = match self.handle_tool_call(name, arguments, &ctx).await {
                    None => {
                        return Some(McpResponse::error(
                            request.id,
                            -32602,
                            format!("Unknown tool: {}", name),
                        ))
                    }
                    Some(Ok(value)) => ToolCallResult::json(value),
                    Some(Err(e)) => {
                        tracing::warn!(tool = name, "Tool call failed: {}", e);
                        ToolCallResult::error(e.to_string())
                    }
                };
                McpResponse::success(request.id, json!(tool_result))
            }
            _ => McpResponse::error(
                request.id,
                -32601,
                format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }
}
