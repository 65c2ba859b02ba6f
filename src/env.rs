//! Environment lookup
//!
//! Model ids and the stdio credential come from environment variables. Reads go
//! through [`EnvSource`] so the resolvers can be driven by a fixed map in tests
//! instead of the process environment.

use std::collections::HashMap;
use std::sync::Arc;

/// Variable holding the API key used in stdio mode
pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
/// Override for the web search model id
pub const GEMINI_WEB_SEARCH_MODEL: &str = "GEMINI_WEB_SEARCH_MODEL";
/// Override for the default model id
pub const GEMINI_DEFAULT_MODEL: &str = "GEMINI_DEFAULT_MODEL";
/// Override for the advanced model id
pub const GEMINI_ADVANCED_MODEL: &str = "GEMINI_ADVANCED_MODEL";

/// Source of environment variables
pub trait EnvSource: Send + Sync {
    /// Look up a variable; `None` when unset or not valid unicode
    fn var(&self, key: &str) -> Option<String>;
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Shared handle to an environment source
pub type SharedEnv = Arc<dyn EnvSource>;

/// Shared handle to the process environment
pub fn process_env() -> SharedEnv {
    Arc::new(ProcessEnv)
}

/// Build a fixed environment from key/value pairs
pub fn fixed_env<I, K, V>(vars: I) -> SharedEnv
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let map: HashMap<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();
    Arc::new(map)
}
