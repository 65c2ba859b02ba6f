//! Authentication for the MCP tools
//!
//! Provides:
//! - The HTTP Auth Gate that validates `Authorization: Bearer <token>`
//! - Request-scoped auth state carried from the HTTP layer into tool calls
//! - Credential resolution for the Gemini client, per transport mode

mod credentials;
mod gate;

pub use credentials::{Credential, CredentialError, CredentialResolver};
pub use gate::{
    bearer_token, parse_authorization, require_bearer, AuthRejection, INVALID_HEADER_DETAIL,
    MISSING_HEADER_DETAIL, UNAUTHENTICATED_PATH,
};

use std::fmt;

/// Auth state of one inbound HTTP request
///
/// Inserted into the request's extensions by the Auth Gate and moved into
/// that request's [`RequestContext`]. It is never stored anywhere shared.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestAuthState {
    bearer_token: Option<String>,
}

impl RequestAuthState {
    /// State for a request that passed the Auth Gate
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(token.into()),
        }
    }

    /// State for a request that carries no token
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }
}

impl fmt::Debug for RequestAuthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestAuthState")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

/// Context for a single tool invocation
///
/// `auth` is `Some` only when the call arrived through an HTTP request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub auth: Option<RequestAuthState>,
}

impl RequestContext {
    /// Context for a call that did not come from an HTTP request (stdio)
    pub fn none() -> Self {
        Self { auth: None }
    }

    /// Context for a call made while serving an HTTP request
    pub fn http(auth: RequestAuthState) -> Self {
        Self { auth: Some(auth) }
    }
}
