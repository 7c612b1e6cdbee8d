//! Operation layer error types.
//!
//! Most of this crate is deliberately total: the resolver answers bad input
//! with a clarification result instead of an error.  [`OpsError`] covers the
//! few places where a caller asks a direct question about invalid data.

/// Unified error type for the operations crate.
#[derive(Debug, thiserror::Error)]
pub enum OpsError {
    // -- Path errors ---------------------------------------------------------
    /// A dotted object path failed validation.
    #[error("invalid object path `{path}`: {reason}")]
    InvalidPath { path: String, reason: String },

    // -- Generic -------------------------------------------------------------
    /// Catch-all for unexpected internal errors.  Prefer a typed variant
    /// whenever possible.
    #[error("internal ops error: {0}")]
    Internal(String),
}

/// Convenience alias used throughout the operations crate.
pub type Result<T> = std::result::Result<T, OpsError>;
