//! HTTP Auth Gate
//!
//! Runs ahead of every route except the landing page at `/`. Rejects requests
//! without a well-formed `Authorization: Bearer <token>` header with 401 and a
//! `{"detail": ...}` body; otherwise stores the token in the request's
//! extensions as [`RequestAuthState`]. The token itself is not validated here,
//! the Gemini API rejects bad keys when the tool runs.

use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use super::RequestAuthState;

pub const MISSING_HEADER_DETAIL: &str = "Authorization header missing";
pub const INVALID_HEADER_DETAIL: &str = "Invalid Authorization header. Must be 'Bearer <token>'";

/// Path served without authentication
pub const UNAUTHENTICATED_PATH: &str = "/";

/// Why the Auth Gate turned a request away
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRejection {
    #[error("Authorization header missing")]
    MissingHeader,
    #[error("Invalid Authorization header. Must be 'Bearer <token>'")]
    MalformedHeader,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": self.to_string() })),
        )
            .into_response()
    }
}

/// Extract the token from a raw `Authorization` value
///
/// The value is split on whitespace; it must yield exactly `bearer` (any case)
/// followed by one token, which is returned verbatim.
pub fn bearer_token(header: &str) -> Result<String, AuthRejection> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => {
            Ok(token.to_string())
        }
        _ => Err(AuthRejection::MalformedHeader),
    }
}

/// Validate an optional `Authorization` header value
pub fn parse_authorization(value: Option<&HeaderValue>) -> Result<String, AuthRejection> {
    let value = match value {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthRejection::MissingHeader),
    };
    let header = value.to_str().map_err(|_| AuthRejection::MalformedHeader)?;
    bearer_token(header)
}

/// axum middleware implementing the Auth Gate
pub async fn require_bearer(mut request: Request, next: Next) -> Response {
    if request.uri().path() == UNAUTHENTICATED_PATH {
        return next.run(request).await;
    }

    match parse_authorization(request.headers().get(AUTHORIZATION)) {
        Ok(token) => {
            request
                .extensions_mut()
                .insert(RequestAuthState::with_token(token));
            next.run(request).await
        }
        Err(rejection) => {
            tracing::info!(path = %request.uri().path(), "< 401 {}", rejection);
            rejection.into_response()
        }
    }
}
