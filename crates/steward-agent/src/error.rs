//! Agent error types.
//!
//! All agent subsystems surface errors through [`AgentError`].  Each variant
//! carries enough context for callers to decide how to handle the failure.

/// Unified error type for the completion client.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    // -- Configuration errors ------------------------------------------------
    /// No API key was provided (set `ANTHROPIC_API_KEY`).
    #[error("missing Anthropic API key (set ANTHROPIC_API_KEY)")]
    MissingApiKey,

    /// Configuration validation or loading failed.
    #[error("config error: {reason}")]
    ConfigError { reason: String },

    // -- Request errors ------------------------------------------------------
    /// An HTTP request to the completion API failed.
    #[error("completion request failed: {reason}")]
    RequestFailed { reason: String },

    /// The completion response could not be parsed into the expected format.
    #[error("completion response parse error: {reason}")]
    ParseFailed { reason: String },

    // -- Serialization -------------------------------------------------------
    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias used throughout the agent crate.
pub type Result<T> = std::result::Result<T, AgentError>;

impl From<reqwest::Error> for AgentError {
    fn from(err: reqwest::Error) -> Self {
        Self::RequestFailed {
            reason: err.to_string(),
        }
    }
}
