//! Session-scoped, append-only action log.
//!
//! Every operation that emits SQL is recorded exactly once; results without
//! SQL (help, clarifications, unknown intents) leave no trace.  Entries are
//! never mutated or removed, and readers get point-in-time snapshots.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use steward_intent::Intent;

use crate::resolver::{ActionDescriptor, OperationResult};

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// Outcome recorded for an executed statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogStatus {
    Success,
    Failed,
}

/// One emitted statement and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Time-ordered unique id.
    pub id: Uuid,

    /// When the statement was recorded.
    pub timestamp: DateTime<Utc>,

    /// The intent that produced the statement.
    pub intent: Intent,

    /// The SQL that was emitted.
    pub sql: String,

    /// Structured summary of the operation.
    pub action: ActionDescriptor,

    /// Whether execution succeeded.
    pub status: LogStatus,

    /// The display message that accompanied the statement.
    pub message: String,
}

impl LogEntry {
    fn new(
        intent: Intent,
        sql: impl Into<String>,
        action: ActionDescriptor,
        status: LogStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            timestamp: Utc::now(),
            intent,
            sql: sql.into(),
            action,
            status,
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

/// Append-only log of emitted statements, safe to share across tasks.
#[derive(Debug, Default)]
pub struct ActionLog {
    entries: RwLock<Vec<LogEntry>>,
}

impl ActionLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `result` if it carries SQL.
    ///
    /// Returns the new entry's id, or `None` when the result has no SQL and
    /// nothing was logged.
    pub fn record(
        &self,
        intent: Intent,
        result: &OperationResult,
        status: LogStatus,
    ) -> Option<Uuid> {
        let sql = result.sql.as_deref()?;
        let entry = LogEntry::new(
            intent,
            sql,
            result.action.clone(),
            status,
            result.message.clone(),
        );
        let id = entry.id;

        match self.entries.write() {
            Ok(mut entries) => {
                entries.push(entry);
                Some(id)
            }
            Err(_) => {
                warn!("action log lock poisoned, dropping entry");
                None
            }
        }
    }

    /// Point-in-time copy of all entries, oldest first.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries
            .read()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
