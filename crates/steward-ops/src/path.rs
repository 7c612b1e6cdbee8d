//! Securable object paths.
//!
//! Unity Catalog addresses objects with a dotted three-level namespace:
//! `catalog`, `catalog.schema`, `catalog.schema.table`.  [`ObjectPath`]
//! validates a raw dotted string once, after which every consumer can rely
//! on well-formed parts.  Identifier casing is preserved exactly as given.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{OpsError, Result};

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// True when `s` is a bare identifier: ASCII letters, digits, and
/// underscores, at least one character.
pub fn is_valid_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

// ---------------------------------------------------------------------------
// Securable kinds
// ---------------------------------------------------------------------------

/// What a path addresses, decided purely by its depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurableKind {
    /// One part: `sales`.
    Catalog,
    /// Two parts: `sales.analytics`.
    Schema,
    /// Three parts: `sales.analytics.orders`.
    Table,
}

impl SecurableKind {
    /// The lowercase wire name (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Schema => "schema",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for SecurableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Paths
// ---------------------------------------------------------------------------

/// A validated dotted object path of one to three parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectPath {
    parts: Vec<String>,
}

impl ObjectPath {
    /// Parse and validate a raw dotted path.
    ///
    /// Every part must be a bare identifier; depth must be between one and
    /// three.  Surrounding whitespace is trimmed, nothing else is rewritten.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(OpsError::InvalidPath {
                path: raw.to_string(),
                reason: "path is empty".to_string(),
            });
        }

        let parts: Vec<&str> = raw.split('.').collect();
        if parts.len() > 3 {
            return Err(OpsError::InvalidPath {
                path: raw.to_string(),
                reason: format!(
                    "{} parts is too deep, the namespace is catalog.schema.table",
                    parts.len()
                ),
            });
        }

        for part in &parts {
            if part.is_empty() {
                return Err(OpsError::InvalidPath {
                    path: raw.to_string(),
                    reason: "empty path segment".to_string(),
                });
            }
            if !is_valid_identifier(part) {
                return Err(OpsError::InvalidPath {
                    path: raw.to_string(),
                    reason: format!(
                        "`{part}` is not a valid identifier (letters, digits, underscores)"
                    ),
                });
            }
        }

        Ok(Self {
            parts: parts.into_iter().map(String::from).collect(),
        })
    }

    /// The securable kind implied by this path's depth.
    pub fn kind(&self) -> SecurableKind {
        match self.parts.len() {
            1 => SecurableKind::Catalog,
            2 => SecurableKind::Schema,
            _ => SecurableKind::Table,
        }
    }

    /// Number of parts (1 to 3).
    pub fn depth(&self) -> usize {
        self.parts.len()
    }

    /// The validated parts, outermost first.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.parts.join("."))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
