//! Credential resolution for the Gemini client
//!
//! stdio: the key comes from `GEMINI_API_KEY`.
//! streamable-http: the key is the bearer token the Auth Gate stored for the
//! request being served, passed in through [`RequestContext`].

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::RequestContext;
use crate::env::{SharedEnv, GEMINI_API_KEY};
use crate::error::Result;
use crate::gemini::{ClientFactory, ModelClient};
use crate::transport::TransportMode;

/// Why no credential could be produced
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialError {
    #[error("Authentication failed. GEMINI_API_KEY not found for stdio mode.")]
    StdioKeyMissing,

    #[error("Tool must be called via an HTTP request for streamable-http mode.")]
    NoHttpRequest,

    #[error("Authentication failed in streamable-http mode. Bearer token not found.")]
    BearerTokenMissing,
}

/// A Gemini API key
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Produces a credential, and a client bound to it, for each tool call
#[derive(Clone)]
pub struct CredentialResolver {
    mode: TransportMode,
    env: SharedEnv,
    factory: Arc<dyn ClientFactory>,
}

impl CredentialResolver {
    pub fn new(mode: TransportMode, env: SharedEnv, factory: Arc<dyn ClientFactory>) -> Self {
        Self { mode, env, factory }
    }

    /// Resolve the API key for the current call
    pub fn resolve(&self, ctx: &RequestContext) -> std::result::Result<Credential, CredentialError> {
        match self.mode {
            TransportMode::Stdio => self
                .env
                .var(GEMINI_API_KEY)
                .filter(|key| !key.trim().is_empty())
                .map(Credential)
                .ok_or(CredentialError::StdioKeyMissing),
            TransportMode::StreamableHttp => {
                let auth = ctx.auth.as_ref().ok_or(CredentialError::NoHttpRequest)?;
                auth.bearer_token()
                    .filter(|token| !token.is_empty())
                    .map(Credential::new)
                    .ok_or(CredentialError::BearerTokenMissing)
            }
        }
    }

    /// Resolve the credential and build a fresh client bound to it
    ///
    /// Clients are not cached: in HTTP mode each request may carry a
    /// different key.
    pub fn client(&self, ctx: &RequestContext) -> Result<Arc<dyn ModelClient>> {
        let credential = self.resolve(ctx).map_err(|err| {
            tracing::warn!(mode = %self.mode, "Credential resolution failed: {}", err);
            err
        })?;
        Ok(self.factory.create(credential))
    }
}

impl fmt::Debug for CredentialResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialResolver")
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
