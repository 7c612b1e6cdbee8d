//! Anthropic Messages API client.
//!
//! Non-streaming only: intent analysis sends one small request per user
//! message and needs the complete reply before any JSON can be extracted
//! from it, so there is nothing to render incrementally.

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Value, json};

use crate::config::AgentConfig;
use crate::error::{AgentError, Result};
use crate::types::CompletionRequest;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Anthropic API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// A client for the Anthropic Messages API.
///
/// The configuration is validated at construction, so a held client is
/// always ready to send.  Cheap to clone; the underlying connection pool is
/// shared.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    config: AgentConfig,
    http: reqwest::Client,
}

impl CompletionClient {
    /// Create a new client with the given configuration.
    ///
    /// Fails if the configuration does not validate or the HTTP client
    /// cannot be built.
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| AgentError::RequestFailed {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { config, http })
    }

    /// The model requests default to when [`CompletionRequest::model`] is
    /// empty.
    pub fn default_model(&self) -> &str {
        &self.config.model
    }

    /// Send a completion request and return the first text content block of
    /// the reply.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = self.build_request_body(request);
        let resp = self.send_request(&body).await?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| AgentError::RequestFailed {
                reason: format!("failed to read response body: {e}"),
            })?;

        if !status.is_success() {
            return Err(AgentError::RequestFailed {
                reason: format!("API returned {status}: {text}"),
            });
        }

        let v: Value = serde_json::from_str(&text).map_err(|e| AgentError::ParseFailed {
            reason: format!("invalid JSON response: {e}"),
        })?;

        first_text_block(&v)
    }

    // -- Request building ----------------------------------------------------

    /// Build the JSON body for the Messages API.
    fn build_request_body(&self, request: &CompletionRequest) -> Value {
        let mut body = json!({
            "model": if request.model.is_empty() {
                &self.config.model
            } else {
                &request.model
            },
            "max_tokens": request.max_tokens.unwrap_or(self.config.max_tokens),
            "messages": request.messages,
        });

        if let Some(system) = &request.system {
            body["system"] = json!(system);
        }

        if let Some(temp) = request.temperature {
            body["temperature"] = json!(temp);
        }

        body
    }

    /// Send the HTTP request to the Messages API endpoint.
    async fn send_request(&self, body: &Value) -> Result<reqwest::Response> {
        let url = format!("{}/v1/messages", self.config.base_url);

        let mut headers = HeaderMap::new();
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.config.api_key).map_err(|e| {
                AgentError::RequestFailed {
                    reason: format!("invalid API key header: {e}"),
                }
            })?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        tracing::debug!(url = %url, model = %body["model"], "sending completion request");

        self.http
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| AgentError::RequestFailed {
                reason: e.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Extract the first text content block from a Messages API response.
///
/// Non-text blocks (e.g. thinking) are skipped.
fn first_text_block(v: &Value) -> Result<String> {
    let content = v["content"]
        .as_array()
        .ok_or_else(|| AgentError::ParseFailed {
            reason: "missing `content` array in response".into(),
        })?;

    for block in content {
        if block["type"].as_str() == Some("text")
            && let Some(text) = block["text"].as_str()
        {
            return Ok(text.to_owned());
        }
    }

    Err(AgentError::ParseFailed {
        reason: "no text content block in response".into(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
