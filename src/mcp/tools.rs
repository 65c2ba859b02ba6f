//! MCP tool definitions for the Gemini server

use serde_json::json;

use super::protocol::ToolDefinition;

pub const WEB_SEARCH: &str = "web_search";
pub const USE_GEMINI: &str = "use_gemini";

/// All tool definitions: (name, description, input schema)
pub const TOOL_DEFINITIONS: &[(&str, &str, &str)] = &[
    (
        WEB_SEARCH,
        "Performs a web search using Gemini's Google Search grounding. Use this when you need current \
         information, recent events, or facts that may have changed. Set include_citations to get \
         the search queries used and the sources backing each part of the answer.",
        r#"{
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "The search query"},
                "include_citations": {"type": "boolean", "default": false, "description": "Return web search queries and structured citations alongside the text"}
            },
            "required": ["query"]
        }"#,
    ),
    (
        USE_GEMINI,
        "Sends a prompt directly to a Gemini model. Useful for delegating analysis, summarization, \
         or a second opinion. Uses the configured default model unless one is given.",
        r#"{
            "type": "object",
            "properties": {
                "prompt": {"type": "string", "description": "The prompt to send"},
                "model": {"type": "string", "description": "Gemini model to use; must start with 'gemini-'"}
            },
            "required": ["prompt"]
        }"#,
    ),
];

/// Get all tool definitions as ToolDefinition structs
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    TOOL_DEFINITIONS
        .iter()
        .map(|(name, description, schema)| ToolDefinition {
            name: name.to_string(),
            description: description.to_string(),
            input_schema: serde_json::from_str(schema).unwrap_or(json!({})),
        })
        .collect()
}
