//! Intent recognition pipeline for Steward.
//!
//! This crate turns free-form text into a [`ResolvedIntent`] in two tiers:
//!
//! - **[`rules`]** -- Ordered case-insensitive regex rules with named
//!   captures; first match wins, captures keep the user's casing.
//! - **[`analyzer`]** -- Completion-backed fallback that prompts the model
//!   for a structured JSON reply and normalizes it, degrading to `help`
//!   instead of erroring.
//! - **[`interpreter`]** -- Chains the tiers behind [`IntentSource`] into a
//!   total resolution: every input produces exactly one intent.
//! - **[`types`]** -- The closed [`Intent`] vocabulary and canonical
//!   [`IntentParams`] record shared by all tiers.

pub mod analyzer;
pub mod error;
pub mod interpreter;
pub mod rules;
pub mod types;

pub use analyzer::CompletionAnalyzer;
pub use error::{IntentError, Result};
pub use interpreter::{IntentSource, Interpreter};
pub use rules::{IntentRule, RuleMatcher};
pub use types::{Intent, IntentOrigin, IntentParams, ParamKey, ResolvedIntent};
