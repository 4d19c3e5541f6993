//! Shared types used across the nyaya crates.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default response language when a request does not carry one.
pub const DEFAULT_LANG: &str = "en";

/// Per-request session context carried through skill execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    /// Caller session identifier (one per connected client).
    pub session_id: String,
    /// Optional correlation id for request tracing.
    pub correlation_id: Option<String>,
    /// Preferred response language tag (e.g. "en", "hi", "hi-IN").
    /// When None or empty, [`DEFAULT_LANG`] is used.
    #[serde(default)]
    pub lang: Option<String>,
}

impl SessionContext {
    /// Resolved language tag (never empty).
    pub fn resolved_lang(&self) -> &str {
        self.lang
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_LANG)
    }
}

/// High-level goal types the orchestrator can delegate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Goal {
    /// Execute a named skill with optional payload.
    ExecuteSkill { name: String, payload: Option<serde_json::Value> },
    /// Answer a free-text legal question from the topic knowledge base.
    AskExpert {
        query: String,
        #[serde(default)]
        lang: Option<String>,
    },
    /// Summarize a pasted legal document (local heuristic or remote service).
    SummarizeDocument {
        document_text: String,
        #[serde(default)]
        lang: Option<String>,
    },
    /// Custom goal for extension.
    Custom(String),
}

/// Global application configuration (gateway + identity). Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Application identity shown in status responses.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Path to an external knowledge JSON file. When unset, the built-in
    /// pack compiled into nyaya-core is used.
    #[serde(default)]
    pub knowledge_path: Option<String>,
    /// Document summary mode ("local" or "remote").
    pub summary_mode: String,
    /// Default language tag for requests that do not carry one.
    pub default_lang: String,
}

impl CoreConfig {
    /// Load config from file and environment. Precedence: env `NYAYA_CONFIG` path > `config/gateway.toml` > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("NYAYA_CONFIG").unwrap_or_else(|_| "config/gateway.toml".to_string());
        let builder = config::Config::builder()
            .set_default("app_name", "Nyaya Sahayak Gateway")?
            .set_default("port", 8001_i64)?
            .set_default("summary_mode", "local")?
            .set_default("default_lang", DEFAULT_LANG)?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("NYAYA").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}
