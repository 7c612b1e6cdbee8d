//! API configuration with env loading and validation.
//!
//! Settings come from the environment (`ANTHROPIC_API_KEY`,
//! `ANTHROPIC_MODEL`, `ANTHROPIC_MAX_TOKENS`, optionally
//! `ANTHROPIC_BASE_URL`) and are validated before a client is built, so a
//! bad key or out-of-range token budget fails at startup rather than on the
//! first request.

use url::Url;

use crate::error::{AgentError, Result};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default Anthropic API base URL.
const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default maximum tokens per completion.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

/// Accepted `max_tokens` range.
const MAX_TOKENS_RANGE: std::ops::RangeInclusive<u32> = 100..=200_000;

/// Prefix every Anthropic API key carries.
const API_KEY_PREFIX: &str = "sk-ant-";

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the Anthropic completion client.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// API key for authentication.
    pub api_key: String,
    /// Model identifier to request completions from.
    pub model: String,
    /// Maximum tokens per completion.
    pub max_tokens: u32,
    /// Base URL for the API (overridable for compatible test endpoints).
    pub base_url: String,
}

impl AgentConfig {
    /// Create a configuration with the given API key and default settings.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_owned(),
            max_tokens: DEFAULT_MAX_TOKENS,
            base_url: ANTHROPIC_BASE_URL.to_owned(),
        }
    }

    /// Override the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Load configuration from environment variables.
    ///
    /// `ANTHROPIC_API_KEY` is required; the other variables fall back to
    /// their defaults when unset.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| AgentError::MissingApiKey)?;

        let model =
            std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_owned());

        let max_tokens = match std::env::var("ANTHROPIC_MAX_TOKENS") {
            Ok(raw) => raw.parse::<u32>().map_err(|e| AgentError::ConfigError {
                reason: format!("ANTHROPIC_MAX_TOKENS must be an integer: {e}"),
            })?,
            Err(_) => DEFAULT_MAX_TOKENS,
        };

        let base_url =
            std::env::var("ANTHROPIC_BASE_URL").unwrap_or_else(|_| ANTHROPIC_BASE_URL.to_owned());

        Ok(Self {
            api_key,
            model,
            max_tokens,
            base_url,
        })
    }

    /// Validate the configuration.
    ///
    /// Checks the API key shape, the `max_tokens` range, and that the base
    /// URL parses.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(AgentError::MissingApiKey);
        }

        if !self.api_key.starts_with(API_KEY_PREFIX) {
            return Err(AgentError::ConfigError {
                reason: format!(
                    "ANTHROPIC_API_KEY does not look like an Anthropic key (expected `{API_KEY_PREFIX}` prefix)"
                ),
            });
        }

        if !MAX_TOKENS_RANGE.contains(&self.max_tokens) {
            return Err(AgentError::ConfigError {
                reason: format!(
                    "max_tokens {} outside accepted range {}..={}",
                    self.max_tokens,
                    MAX_TOKENS_RANGE.start(),
                    MAX_TOKENS_RANGE.end()
                ),
            });
        }

        if let Err(e) = Url::parse(&self.base_url) {
            return Err(AgentError::ConfigError {
                reason: format!("invalid base URL `{}`: {e}", self.base_url),
            });
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = AgentConfig::new("sk-ant-test-key");
        assert!(config.validate().is_ok());
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn empty_key_is_missing() {
        let config = AgentConfig::new("");
        match config.validate() {
            Err(AgentError::MissingApiKey) => {}
            other => panic!("expected MissingApiKey, got {other:?}"),
        }
    }

    #[test]
    fn key_without_prefix_rejected() {
        let config = AgentConfig::new("not-an-anthropic-key");
        match config.validate() {
            Err(AgentError::ConfigError { reason }) => {
                assert!(reason.contains("sk-ant-"));
            }
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn max_tokens_bounds_enforced() {
        let mut config = AgentConfig::new("sk-ant-test-key");

        config.max_tokens = 99;
        assert!(config.validate().is_err());

        config.max_tokens = 100;
        assert!(config.validate().is_ok());

        config.max_tokens = 200_000;
        assert!(config.validate().is_ok());

        config.max_tokens = 200_001;
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_base_url_rejected() {
        let mut config = AgentConfig::new("sk-ant-test-key");
        config.base_url = "not a url".into();
        match config.validate() {
            Err(AgentError::ConfigError { reason }) => {
                assert!(reason.contains("base URL"));
            }
            other => panic!("expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn with_model_overrides() {
        let config = AgentConfig::new("sk-ant-test-key").with_model("claude-3-5-haiku-20241022");
        assert_eq!(config.model, "claude-3-5-haiku-20241022");
        assert!(config.validate().is_ok());
    }
}
