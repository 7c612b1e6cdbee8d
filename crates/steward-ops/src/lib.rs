//! Operation resolution and action logging for Steward.
//!
//! This crate turns recognized intents into executable output:
//!
//! - **[`resolver`]** -- Exhaustive dispatch from [`Intent`] to SQL
//!   statement, display message, and [`ActionDescriptor`]; bad parameters
//!   yield clarification results instead of errors.
//! - **[`path`]** -- Validated dotted object paths over the
//!   catalog/schema/table namespace.
//! - **[`log`]** -- Session-scoped append-only [`ActionLog`]: one entry per
//!   emitted statement, never mutated.
//!
//! [`Intent`]: steward_intent::Intent

pub mod error;
pub mod log;
pub mod path;
pub mod resolver;

pub use error::{OpsError, Result};
pub use log::{ActionLog, LogEntry, LogStatus};
pub use path::{ObjectPath, SecurableKind, is_valid_identifier};
pub use resolver::{
    ActionDescriptor, ListTarget, OperationResult, Resolver, ResolverOptions, UnqualifiedNames,
};
