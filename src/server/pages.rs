//! Static pages

use axum::response::Html;

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Gemini MCP Server</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 42rem; margin: 3rem auto; padding: 0 1rem; line-height: 1.5; color: #222; }
    code, pre { background: #f4f4f4; border-radius: 4px; padding: 0.1rem 0.3rem; }
    pre { padding: 0.75rem; overflow-x: auto; }
  </style>
</head>
<body>
  <h1>Gemini MCP Server</h1>
  <p>This server exposes Gemini-backed tools over the Model Context Protocol.</p>
  <h2>Tools</h2>
  <ul>
    <li><code>web_search</code>: search the web with Google Search grounding, optionally with citations</li>
    <li><code>use_gemini</code>: send a prompt to a Gemini model</li>
  </ul>
  <h2>Connecting</h2>
  <p>Send JSON-RPC requests to the MCP endpoint with your Gemini API key as a bearer token:</p>
  <pre>Authorization: Bearer &lt;GEMINI_API_KEY&gt;</pre>
  <p>Every path except this page requires the header.</p>
</body>
</html>
"#;

/// Landing page served at `/` without authentication
pub async fn landing_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
