//! Environment-derived configuration, resolved once at startup.
//!
//! Every collaborator receives its settings from `AppConfig`; nothing
//! reads the environment after construction, and a missing credential
//! fails here instead of on the first model call.

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Revisia";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_MODEL_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_PORT: u16 = 8080;

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "revisia=info,tower_http=warn"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing credential: set the {0} environment variable")]
    MissingCredential(&'static str),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_api_key: String,
    pub model_base_url: String,
    pub model_name: String,
    pub model_timeout_secs: u64,
    pub port: u16,
    pub ncbi_api_key: Option<String>,
    pub semantic_scholar_api_key: Option<String>,
    pub cors_origin: Option<String>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary lookup. Factored out so tests can inject
    /// an environment without mutating the process one.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let model_api_key = get("LLM_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingCredential("LLM_API_KEY"))?;

        let port = match get("PORT") {
            None => DEFAULT_PORT,
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: value.clone(),
            })?,
        };

        let model_timeout_secs = match get("LLM_TIMEOUT_SECS") {
            None => DEFAULT_MODEL_TIMEOUT_SECS,
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "LLM_TIMEOUT_SECS",
                value: value.clone(),
            })?,
        };

        Ok(Self {
            model_api_key,
            model_base_url: get("LLM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_MODEL_BASE_URL.to_string()),
            model_name: get("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            model_timeout_secs,
            port,
            ncbi_api_key: get("NCBI_API_KEY").filter(|v| !v.trim().is_empty()),
            semantic_scholar_api_key: get("S2_API_KEY").filter(|v| !v.trim().is_empty()),
            cors_origin: get("CORS_ORIGIN").filter(|v| !v.trim().is_empty()),
        })
    }

    /// Fixed configuration for unit tests. No environment involved.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            model_api_key: "test-key".to_string(),
            model_base_url: "http://127.0.0.1:9".to_string(),
            model_name: "test-model".to_string(),
            model_timeout_secs: 5,
            port: 0,
            ncbi_api_key: None,
            semantic_scholar_api_key: None,
            cors_origin: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn from(map: &HashMap<String, String>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn missing_api_key_fails_at_construction() {
        let err = from(&env(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential("LLM_API_KEY")));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let err = from(&env(&[("LLM_API_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredential(_)));
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = from(&env(&[("LLM_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.model_base_url, DEFAULT_MODEL_BASE_URL);
        assert_eq!(config.model_name, DEFAULT_MODEL);
        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.ncbi_api_key.is_none());
        assert!(config.cors_origin.is_none());
    }

    #[test]
    fn explicit_values_override_defaults() {
        let config = from(&env(&[
            ("LLM_API_KEY", "sk-test"),
            ("LLM_BASE_URL", "http://localhost:11434/v1"),
            ("LLM_MODEL", "llama3:8b"),
            ("PORT", "9090"),
            ("CORS_ORIGIN", "https://app.example.com"),
        ]))
        .unwrap();
        assert_eq!(config.model_base_url, "http://localhost:11434/v1");
        assert_eq!(config.model_name, "llama3:8b");
        assert_eq!(config.port, 9090);
        assert_eq!(
            config.cors_origin.as_deref(),
            Some("https://app.example.com")
        );
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err =
            from(&env(&[("LLM_API_KEY", "sk-test"), ("PORT", "not-a-port")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { name: "PORT", .. }
        ));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
