//! Tool bodies: `web_search` and `use_gemini`

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::auth::{CredentialResolver, RequestContext};
use crate::config::{is_valid_model, ConfigResolver, MODEL_PREFIX};
use crate::error::{GeminiMcpError, Result};
use crate::gemini::{GenerateContentRequest, GenerationConfig};
use crate::grounding::{structured_citations, TextOutput, WebSearchOutput};

/// Arguments of `web_search`
#[derive(Debug, Clone, Deserialize)]
pub struct WebSearchInput {
    pub query: String,
    #[serde(default)]
    pub include_citations: bool,
}

/// Arguments of `use_gemini`
#[derive(Debug, Clone, Deserialize)]
pub struct UseGeminiInput {
    pub prompt: String,
    #[serde(default)]
    pub model: Option<String>,
}

/// Research prompt sent to the search-grounded model
pub fn web_search_prompt(query: &str, current_date: &str) -> String {
    format!(
        r#"Conduct targeted Google Searches to gather the most recent, credible information on "{query}" and synthesize it into a verifiable text artifact.

Instructions:
- Query should ensure that the most current information is gathered. The current date is {current_date}.
- Conduct multiple, diverse searches to gather comprehensive information.
- Consolidate key findings while meticulously tracking the source(s) for each specific piece of information.
- The output should be a well-written summary or report based on your search findings.
- Only include the information found in the search results, don't make up any information.

Research Topic:
{query}
"#
    )
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Parse tool arguments into their input struct
pub fn parse_input<T: serde::de::DeserializeOwned>(tool: &str, arguments: Value) -> Result<T> {
    serde_json::from_value(arguments)
        .map_err(|e| GeminiMcpError::InvalidInput(format!("{}: {}", tool, e)))
}

/// The Gemini-backed tools
#[derive(Clone)]
pub struct GeminiTools {
    resolver: CredentialResolver,
    config: Arc<ConfigResolver>,
}

impl GeminiTools {
    pub fn new(resolver: CredentialResolver, config: Arc<ConfigResolver>) -> Self {
        Self { resolver, config }
    }

    /// Search the web through Gemini's Google Search grounding
    pub async fn web_search(&self, input: WebSearchInput, ctx: &RequestContext) -> Result<Value> {
        let client = self.resolver.client(ctx)?;
        let model = self.config.web_search_model();

        tracing::info!(model = %model, citations = input.include_citations, "web_search");

        let request =
            GenerateContentRequest::new(model, web_search_prompt(&input.query, &today()))
                .with_config(GenerationConfig::grounded_search());
        let response = client.generate_content(request).await?;
        let text = response.text();

        if !input.include_citations {
            return Ok(serde_json::to_value(TextOutput { text })?);
        }

        let metadata = response.grounding_metadata();
        let output = WebSearchOutput {
            text,
            web_search_queries: metadata
                .map(|m| m.web_search_queries.clone())
                .unwrap_or_default(),
            citations: structured_citations(metadata),
        };
        Ok(serde_json::to_value(output)?)
    }

    /// Send a prompt to a Gemini model
    pub async fn use_gemini(&self, input: UseGeminiInput, ctx: &RequestContext) -> Result<Value> {
        if let Some(model) = input.model.as_deref() {
            if !is_valid_model(model) {
                return Err(GeminiMcpError::InvalidInput(format!(
                    "Invalid model: {}. Must start with '{}'",
                    model, MODEL_PREFIX
                )));
            }
        }

        let client = self.resolver.client(ctx)?;
        let model = input
            .model
            .unwrap_or_else(|| self.config.default_model());

        tracing::info!(model = %model, "use_gemini");

        let response = client
            .generate_content(GenerateContentRequest::new(model, input.prompt))
            .await?;
        Ok(serde_json::to_value(TextOutput {
            text: response.text(),
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::RequestAuthState;
    use crate::env::{fixed_env, GEMINI_API_KEY, GEMINI_DEFAULT_MODEL};
    use crate::gemini::testing::RecordingFactory;
    use crate::gemini::{GenerateContentResponse, GroundingChunk, GroundingMetadata, WebChunk};
    use crate::transport::TransportMode;
    use serde_json::json;

    fn tools(mode: TransportMode, factory: Arc<RecordingFactory>) -> GeminiTools {
        let env = fixed_env([
            (GEMINI_API_KEY, "env-key"),
            (GEMINI_DEFAULT_MODEL, "gemini-2.5-flash"),
        ]);
        GeminiTools::new(
            CredentialResolver::new(mode, env.clone(), factory),
            Arc::new(ConfigResolver::new(env)),
        )
    }

    #[test]
    fn test_prompt_template() {
        let prompt = web_search_prompt("rust async", "2025-01-31");
        assert!(prompt.starts_with(
            "Conduct targeted Google Searches to gather the most recent, credible information on \"rust async\""
        ));
        assert!(prompt.contains("The current date is 2025-01-31."));
        assert!(prompt.ends_with("Research Topic:\nrust async\n"));
    }

    #[test]
    fn test_parse_input_defaults() {
        let input: WebSearchInput = parse_input("web_search", json!({"query": "q"})).unwrap();
        assert!(!input.include_citations);

        let err = parse_input::<UseGeminiInput>("use_gemini", json!({})).unwrap_err();
        assert!(matches!(err, GeminiMcpError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_web_search_text_only() {
        let factory = Arc::new(RecordingFactory::responding(
            GenerateContentResponse::from_text("answer"),
        ));
        let tools = tools(TransportMode::Stdio, factory.clone());

        let out = tools
            .web_search(
                WebSearchInput {
                    query: "news".to_string(),
                    include_citations: false,
                },
                &RequestContext::none(),
            )
            .await
            .unwrap();

        assert_eq!(out, json!({"text": "answer"}));
        assert_eq!(factory.created_keys(), vec!["env-key"]);

        let requests = factory.requests();
        let request = &requests[0];
        assert_eq!(request.model, "gemini-flash-latest");
        assert_eq!(request.config, Some(GenerationConfig::grounded_search()));
        assert!(request.contents.contains("Research Topic:\nnews"));
    }

    #[tokio::test]
    async fn test_web_search_forwards_blank_query() {
        let factory = Arc::new(RecordingFactory::responding(
            GenerateContentResponse::from_text("answer"),
        ));
        let tools = tools(TransportMode::Stdio, factory.clone());

        let out = tools
            .web_search(
                WebSearchInput {
                    query: "   ".to_string(),
                    include_citations: false,
                },
                &RequestContext::none(),
            )
            .await
            .unwrap();

        assert_eq!(out, json!({"text": "answer"}));
        let requests = factory.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].contents.ends_with("Research Topic:\n   \n"));
    }

    #[tokio::test]
    async fn test_web_search_with_citations() {
        let mut response = GenerateContentResponse::from_text("answer");
        response.candidates[0].grounding_metadata = Some(GroundingMetadata {
            web_search_queries: vec!["news today".to_string()],
            grounding_chunks: vec![GroundingChunk {
                web: Some(WebChunk {
                    uri: Some("https://example.com".to_string()),
                    title: Some("example.com".to_string()),
                }),
            }],
            grounding_supports: vec![],
        });
        let factory = Arc::new(RecordingFactory::responding(response));
        let tools = tools(TransportMode::Stdio, factory);

        let out = tools
            .web_search(
                WebSearchInput {
                    query: "news".to_string(),
                    include_citations: true,
                },
                &RequestContext::none(),
            )
            .await
            .unwrap();

        assert_eq!(out["web_search_queries"], json!(["news today"]));
        assert_eq!(out["citations"], json!([]));
    }

    #[tokio::test]
    async fn test_use_gemini_rejects_foreign_model_before_resolving() {
        let factory = Arc::new(RecordingFactory::default());
        let tools = tools(TransportMode::Stdio, factory.clone());

        let err = tools
            .use_gemini(
                UseGeminiInput {
                    prompt: "hi".to_string(),
                    model: Some("gpt-4".to_string()),
                },
                &RequestContext::none(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, GeminiMcpError::InvalidInput(_)));
        assert!(factory.created_keys().is_empty());
    }

    #[tokio::test]
    async fn test_use_gemini_http_without_request() {
        let factory = Arc::new(RecordingFactory::default());
        let tools = tools(TransportMode::StreamableHttp, factory);

        let err = tools
            .use_gemini(
                UseGeminiInput {
                    prompt: "hi".to_string(),
                    model: None,
                },
                &RequestContext::none(),
            )
            .await
            .unwrap_err();
        assert!(err.is_auth());
        assert_eq!(
            err.to_string(),
            "Tool must be called via an HTTP request for streamable-http mode."
        );
    }

    #[tokio::test]
    async fn test_use_gemini_http_token() {
        let factory = Arc::new(RecordingFactory::responding(
            GenerateContentResponse::from_text("ok"),
        ));
        let tools = tools(TransportMode::StreamableHttp, factory.clone());

        let out = tools
            .use_gemini(
                UseGeminiInput {
                    prompt: "hi".to_string(),
                    model: None,
                },
                &RequestContext::http(RequestAuthState::with_token("abc123")),
            )
            .await
            .unwrap();
        assert_eq!(out, json!({"text": "ok"}));
        assert_eq!(factory.created_keys(), vec!["abc123"]);
        let requests = factory.requests();
        assert_eq!(requests[0].model, "gemini-2.5-flash");
        assert!(requests[0].config.is_none());
    }
}
