//! Intent engine error types.
//!
//! All intent subsystems surface errors through [`IntentError`].  Each variant
//! carries enough context for callers to decide how to handle the failure.

/// Unified error type for the intent engine.
#[derive(Debug, thiserror::Error)]
pub enum IntentError {
    // -- Rule errors ---------------------------------------------------------
    /// A rule pattern failed to compile.
    #[error("invalid rule pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    // -- Generic -------------------------------------------------------------
    /// Catch-all for unexpected internal errors.  Prefer a typed variant
    /// whenever possible.
    #[error("internal intent error: {0}")]
    Internal(String),
}

/// Convenience alias used throughout the intent crate.
pub type Result<T> = std::result::Result<T, IntentError>;
