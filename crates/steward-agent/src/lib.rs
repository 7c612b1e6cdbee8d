//! Anthropic completion client for Steward.
//!
//! This crate owns the outbound side of intent analysis: a small,
//! non-streaming client for the Anthropic Messages API plus the
//! environment-driven configuration it runs with.
//!
//! ## Modules
//!
//! - [`client`] -- The Messages API client.
//! - [`config`] -- API configuration with env loading and validation.
//! - [`types`] -- Wire types for completion requests.
//! - [`error`] -- Agent error types.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use client::CompletionClient;
pub use config::{AgentConfig, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
pub use error::{AgentError, Result};
pub use types::{CompletionRequest, Message, Role};
