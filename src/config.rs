//! Model configuration
//!
//! Three model ids (web search, default, advanced) are read from the
//! environment, validated all-or-nothing, and memoized in a single slot until
//! [`ConfigResolver::invalidate`] is called.
//!
//! When any override is invalid the whole attempted config is discarded and
//! the built-in defaults are used, even for overrides that were valid on their
//! own.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;

use crate::env::{
    process_env, SharedEnv, GEMINI_ADVANCED_MODEL, GEMINI_DEFAULT_MODEL, GEMINI_WEB_SEARCH_MODEL,
};

/// Every model id must start with this prefix
pub const MODEL_PREFIX: &str = "gemini-";

pub const DEFAULT_WEB_SEARCH_MODEL: &str = "gemini-flash-latest";
pub const DEFAULT_DEFAULT_MODEL: &str = "gemini-flash-lite-latest";
pub const DEFAULT_ADVANCED_MODEL: &str = "gemini-2.5-pro";

/// The three configurable model slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModelField {
    WebSearch,
    Default,
    Advanced,
}

impl ModelField {
    pub const ALL: [ModelField; 3] = [ModelField::WebSearch, ModelField::Default, ModelField::Advanced];

    /// Field name as used in `ModelConfig`
    pub fn field_name(&self) -> &'static str {
        match self {
            ModelField::WebSearch => "web_search_model",
            ModelField::Default => "default_model",
            ModelField::Advanced => "advanced_model",
        }
    }

    /// Key used in [`ModelConfig::as_map`]
    pub fn key(&self) -> &'static str {
        match self {
            ModelField::WebSearch => "web_search",
            ModelField::Default => "default",
            ModelField::Advanced => "advanced",
        }
    }

    /// Environment variable overriding this field
    pub fn env_var(&self) -> &'static str {
        match self {
            ModelField::WebSearch => GEMINI_WEB_SEARCH_MODEL,
            ModelField::Default => GEMINI_DEFAULT_MODEL,
            ModelField::Advanced => GEMINI_ADVANCED_MODEL,
        }
    }

    /// Built-in default id
    pub fn default_model(&self) -> &'static str {
        match self {
            ModelField::WebSearch => DEFAULT_WEB_SEARCH_MODEL,
            ModelField::Default => DEFAULT_DEFAULT_MODEL,
            ModelField::Advanced => DEFAULT_ADVANCED_MODEL,
        }
    }
}

/// A model id that failed the prefix check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidModel {
    pub field: ModelField,
    pub value: String,
}

impl fmt::Display for InvalidModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid model format: {}. Must start with '{}'",
            self.value, MODEL_PREFIX
        )
    }
}

/// Model configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{}", join_invalid(.0))]
    InvalidModels(Vec<InvalidModel>),
}

fn join_invalid(invalid: &[InvalidModel]) -> String {
    invalid
        .iter()
        .map(|m| format!("{}: {}", m.field.field_name(), m))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check a single model id against the provider naming convention
pub fn is_valid_model(model: &str) -> bool {
    model.starts_with(MODEL_PREFIX)
}

/// Validated model configuration
///
/// Fields are private so a value can only come from [`ModelConfig::new`] or
/// [`Default`], both of which guarantee the prefix constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelConfig {
    web_search_model: String,
    default_model: String,
    advanced_model: String,
}

impl ModelConfig {
    /// Validate and build a config. Every invalid field is reported.
    pub fn new(
        web_search_model: impl Into<String>,
        default_model: impl Into<String>,
        advanced_model: impl Into<String>,
    ) -> std::result::Result<Self, ConfigError> {
        let candidate = Self {
            web_search_model: web_search_model.into(),
            default_model: default_model.into(),
            advanced_model: advanced_model.into(),
        };

        let invalid: Vec<InvalidModel> = ModelField::ALL
            .iter()
            .filter(|field| !is_valid_model(candidate.get(**field)))
            .map(|field| InvalidModel {
                field: *field,
                value: candidate.get(*field).to_string(),
            })
            .collect();

        if invalid.is_empty() {
            Ok(candidate)
        } else {
            Err(ConfigError::InvalidModels(invalid))
        }
    }

    /// Build from an environment source, each missing variable taking its default
    pub fn from_env(env: &SharedEnv) -> std::result::Result<Self, ConfigError> {
        let value = |field: ModelField| {
            let value = env
                .var(field.env_var())
                .unwrap_or_else(|| field.default_model().to_string());
            if value != field.default_model() {
                tracing::info!("Using custom {}: {}", field.env_var(), value);
            }
            value
        };

        Self::new(
            value(ModelField::WebSearch),
            value(ModelField::Default),
            value(ModelField::Advanced),
        )
    }

    pub fn get(&self, field: ModelField) -> &str {
        match field {
            ModelField::WebSearch => &self.web_search_model,
            ModelField::Default => &self.default_model,
            ModelField::Advanced => &self.advanced_model,
        }
    }

    pub fn web_search_model(&self) -> &str {
        &self.web_search_model
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn advanced_model(&self) -> &str {
        &self.advanced_model
    }

    /// All three ids keyed by `web_search`, `default` and `advanced`
    pub fn as_map(&self) -> BTreeMap<&'static str, String> {
        ModelField::ALL
            .iter()
            .map(|field| (field.key(), self.get(*field).to_string()))
            .collect()
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            web_search_model: DEFAULT_WEB_SEARCH_MODEL.to_string(),
            default_model: DEFAULT_DEFAULT_MODEL.to_string(),
            advanced_model: DEFAULT_ADVANCED_MODEL.to_string(),
        }
    }
}

/// Single-slot memoized [`ModelConfig`]
pub struct ConfigResolver {
    env: SharedEnv,
    slot: RwLock<Option<Arc<ModelConfig>>>,
}

impl ConfigResolver {
    pub fn new(env: SharedEnv) -> Self {
        Self {
            env,
            slot: RwLock::new(None),
        }
    }

    /// Return the cached config, loading it on first use or after invalidation
    pub fn get(&self) -> Arc<ModelConfig> {
        if let Some(config) = self.slot.read().clone() {
            return config;
        }

        let mut slot = self.slot.write();
        // Another caller may have loaded it while we waited for the write lock
        if let Some(config) = slot.as_ref() {
            return Arc::clone(config);
        }

        let config = Arc::new(self.load());
        *slot = Some(Arc::clone(&config));
        config
    }

    /// Drop the cached config; the next [`get`](Self::get) rebuilds it
    pub fn invalidate(&self) {
        *self.slot.write() = None;
    }

    pub fn web_search_model(&self) -> String {
        self.get().web_search_model().to_string()
    }

    pub fn default_model(&self) -> String {
        self.get().default_model().to_string()
    }

    pub fn advanced_model(&self) -> String {
        self.get().advanced_model().to_string()
    }

    pub fn all_models(&self) -> BTreeMap<&'static str, String> {
        self.get().as_map()
    }

    fn load(&self) -> ModelConfig {
        match ModelConfig::from_env(&self.env) {
            Ok(config) => {
                tracing::info!("Configuration loaded successfully");
                config
            }
            Err(err) => {
                let ConfigError::InvalidModels(invalid) = &err;
                for model in invalid {
                    tracing::warn!(
                        "Invalid {} format: {}",
                        model.field.field_name(),
                        model.value
                    );
                }
                tracing::warn!("Error loading configuration: {}. Using defaults.", err);
                ModelConfig::default()
            }
        }
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new(process_env())
    }
}

static CONFIG: Lazy<Arc<ConfigResolver>> = Lazy::new(|| Arc::new(ConfigResolver::default()));

/// Process-wide resolver backed by the process environment
pub fn global() -> Arc<ConfigResolver> {
    Arc::clone(&CONFIG)
}

/// Load (or return the cached) process-wide config
pub fn get_config() -> Arc<ModelConfig> {
    CONFIG.get()
}

/// Clear the process-wide cache so the next access re-reads the environment
pub fn clear_config_cache() {
    CONFIG.invalidate();
}

pub fn get_model_for_web_search() -> String {
    CONFIG.web_search_model()
}

pub fn get_default_model() -> String {
    CONFIG.default_model()
}

pub fn get_advanced_model() -> String {
    CONFIG.advanced_model()
}

pub fn get_all_models() -> BTreeMap<&'static str, String> {
    CONFIG.all_models()
}
