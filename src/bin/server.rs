//! Gemini MCP Server
//!
//! Run with: gemini-mcp --transport stdio

use std::str::FromStr;
use std::sync::Arc;

use clap::Parser;

use gemini_mcp::auth::CredentialResolver;
use gemini_mcp::config;
use gemini_mcp::env::process_env;
use gemini_mcp::gemini::GeminiClientFactory;
use gemini_mcp::logging::{init_tracing, LogFormat};
use gemini_mcp::mcp::{GeminiHandler, McpServer};
use gemini_mcp::server::{HttpServer, HttpServerConfig, DEFAULT_HOST, DEFAULT_PATH, DEFAULT_PORT};
use gemini_mcp::tools::GeminiTools;
use gemini_mcp::TransportMode;

#[derive(Parser, Debug)]
#[command(name = "gemini-mcp")]
#[command(about = "Gemini web search and prompting tools over MCP", version)]
struct Args {
    /// Transport mode (stdio or streamable-http)
    #[arg(
        long,
        env = "MCP_TRANSPORT_MODE",
        default_value = "streamable-http",
        value_parser = TransportMode::from_str
    )]
    transport: TransportMode,

    /// Address to bind in streamable-http mode
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Port to bind in streamable-http mode
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// MCP endpoint path in streamable-http mode
    #[arg(long, default_value = DEFAULT_PATH)]
    path: String,

    /// Override the Generative Language API base URL
    #[arg(long, env = "GEMINI_BASE_URL")]
    gemini_base_url: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.log_format);

    let mode = args.transport;
    tracing::info!(transport = %mode, "Starting gemini-mcp v{}", gemini_mcp::VERSION);

    let factory = Arc::new(GeminiClientFactory::new(args.gemini_base_url));
    let resolver = CredentialResolver::new(mode, process_env(), factory);
    let config = config::global();

    let models = config.all_models();
    tracing::info!(
        web_search = %models["web_search"],
        default = %models["default"],
        advanced = %models["advanced"],
        "Models"
    );

    let handler = GeminiHandler::new(GeminiTools::new(resolver, config));

    match mode {
        TransportMode::Stdio => {
            McpServer::new(handler).run().await?;
        }
        TransportMode::StreamableHttp => {
            let config = HttpServerConfig::new(args.host, args.port, &args.path)?;
            let server = HttpServer::new(Arc::new(handler), config);
            server.start().await?;
        }
    }

    Ok(())
}
