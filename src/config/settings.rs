// Configuration structs

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use super::constants::*;

/// Top-level service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name reported by `GET /`
    pub project_name: String,

    /// Log filter used when `RUST_LOG` is not set (e.g. "info", "mindit=debug")
    pub log_level: String,

    /// LLM provider settings
    pub llm: LlmConfig,

    /// HTTP server settings
    pub server: ServerConfig,
}

/// Settings for the chat-completions provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Bearer token for the provider. Empty is allowed; calls will fail and
    /// every stage degrades to its fallback.
    pub api_key: String,

    /// Model identifier sent with every request
    pub model: String,

    /// Endpoint root, e.g. "https://api.openai.com"
    pub base_url: String,

    /// Completion budget per request
    pub max_tokens: u32,

    /// Per-call timeout in seconds
    pub request_timeout_secs: u64,

    /// Extra attempts after a failed call. 0 = fail fast to the fallback.
    pub max_retries: u32,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1:8000")
    pub bind_address: String,
    /// Prefix for versioned routes (e.g., "/api/v1")
    pub api_prefix: String,
    /// Allowed CORS origins; "*" allows any
    pub cors_allow_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            log_level: "info".to_string(),
            llm: LlmConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_retries: 0,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_HTTP_ADDR.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            cors_allow_origins: vec!["*".to_string()],
        }
    }
}

impl LlmConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Config {
    /// Validate configuration and return helpful errors
    pub fn validate(&self) -> Result<()> {
        if self.server.bind_address.parse::<SocketAddr>().is_err() {
            bail!(
                "Invalid bind address '{}' (expected host:port, e.g. 127.0.0.1:8000)",
                self.server.bind_address
            );
        }

        if !self.server.api_prefix.starts_with('/') {
            bail!(
                "API prefix '{}' must start with '/'",
                self.server.api_prefix
            );
        }

        if self.llm.request_timeout_secs == 0 {
            bail!("llm.request_timeout_secs must be greater than 0");
        }

        if self.llm.model.trim().is_empty() {
            bail!("llm.model must not be empty");
        }

        // An empty key is allowed; stages degrade to their fallbacks.

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.llm.model, "gpt-4-turbo");
        assert_eq!(config.server.api_prefix, "/api/v1");
        assert_eq!(config.server.cors_allow_origins, vec!["*".to_string()]);
    }

    #[test]
    fn test_invalid_bind_address_rejected() {
        let mut config = Config::default();
        config.server.bind_address = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_prefix_must_be_absolute() {
        let mut config = Config::default();
        config.server.api_prefix = "api/v1".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.llm.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_api_key_is_not_fatal() {
        let config = Config::default();
        assert!(!config.llm.has_api_key());
        assert!(config.validate().is_ok());
    }
}
