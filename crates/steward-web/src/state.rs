//! Shared application state for the web server.
//!
//! [`AppState`] is wrapped in an `Arc` and shared across all request
//! handlers.  The interpreter and resolver are stateless per request; the
//! action log is the only mutable piece and is internally synchronized.

use steward_intent::Interpreter;
use steward_ops::{ActionLog, Resolver};

/// Shared state accessible from every Axum handler.
pub struct AppState {
    /// Two-stage intent interpreter (rules plus optional analyzer).
    pub interpreter: Interpreter,

    /// Intent-to-SQL dispatcher.
    pub resolver: Resolver,

    /// Append-only log of emitted statements, one entry per SQL result.
    pub log: ActionLog,

    /// Service name reported by the health endpoint.
    pub service_name: String,
}
