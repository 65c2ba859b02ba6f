//! Request tracing middleware
//!
//! Wraps each HTTP request in a root span carrying a short request id.

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::{info_span, Instrument};
use uuid::Uuid;

/// Short request id: the first six hex digits of a v4 uuid
fn gen_id() -> String {
    Uuid::new_v4().simple().to_string()[..6].to_string()
}

/// Middleware that runs the request inside its own root span
pub async fn trace_request(request: Request, next: Next) -> Response {
    let id = gen_id();
    let span = info_span!(parent: None, "http", %id, method = %request.method(), path = %request.uri().path());

    next.run(request).instrument(span).await
}
