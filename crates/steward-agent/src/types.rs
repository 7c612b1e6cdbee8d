//! Wire types for completion requests.
//!
//! These types model the data flowing into the Messages API.  The
//! [`super::client`] module translates them into the provider wire format;
//! responses stay as `serde_json::Value` until the first text block is
//! extracted.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// The role of a participant in a conversation.
///
/// System-level instructions are not a role here: the Messages API carries
/// them in the request's dedicated `system` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Input from the human user.
    User,
    /// Output from the model.
    Assistant,
}

/// A single message in a completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Who produced this message.
    pub role: Role,

    /// The textual content of the message.
    pub content: String,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// A completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier.  Empty string means "use the client default".
    pub model: String,

    /// System instruction, sent in the request's `system` field.
    pub system: Option<String>,

    /// Conversation messages, oldest first.
    pub messages: Vec<Message>,

    /// Maximum tokens for the completion (`None` = client default).
    pub max_tokens: Option<u32>,

    /// Sampling temperature (`None` = provider default).
    pub temperature: Option<f32>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
