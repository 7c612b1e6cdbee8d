//! Intent vocabulary and canonical parameters.
//!
//! [`Intent`] is the closed set of operations the pipeline can recognize;
//! intent names on the wire are camelCase (`createCatalog`, …).
//! [`IntentParams`] is the one parameter shape every recognition tier emits:
//! a record of optional named fields.  Rule captures fill it directly; the
//! fallback analyzer's JSON is normalized into it, zipping positional arrays
//! against each intent's declared slot order.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Intents
// ---------------------------------------------------------------------------

/// A recognized governance operation.
///
/// `Unknown` absorbs any unrecognized name the fallback analyzer may
/// produce, so deserialization is total over the intent field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Intent {
    CreateCatalog,
    CreateSchema,
    CreateTable,
    GrantPermission,
    RevokePermission,
    ListCatalogs,
    ListSchemas,
    ListTables,
    ShowPermissions,
    GetTableDetails,
    SetOwner,
    Help,
    Complex,
    #[serde(other)]
    Unknown,
}

impl Intent {
    /// The wire name of this intent (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateCatalog => "createCatalog",
            Self::CreateSchema => "createSchema",
            Self::CreateTable => "createTable",
            Self::GrantPermission => "grantPermission",
            Self::RevokePermission => "revokePermission",
            Self::ListCatalogs => "listCatalogs",
            Self::ListSchemas => "listSchemas",
            Self::ListTables => "listTables",
            Self::ShowPermissions => "showPermissions",
            Self::GetTableDetails => "getTableDetails",
            Self::SetOwner => "setOwner",
            Self::Help => "help",
            Self::Complex => "complex",
            Self::Unknown => "unknown",
        }
    }

    /// The ordered parameter slots this intent consumes.
    ///
    /// The order is significant: positional parameter lists from the
    /// analyzer are zipped against it.
    pub fn slots(&self) -> &'static [ParamKey] {
        match self {
            Self::CreateCatalog => &[ParamKey::Name],
            Self::CreateSchema | Self::CreateTable => &[ParamKey::Path],
            Self::GrantPermission | Self::RevokePermission => {
                &[ParamKey::Privilege, ParamKey::Object, ParamKey::Principal]
            }
            Self::ListCatalogs => &[],
            Self::ListSchemas => &[ParamKey::Catalog],
            Self::ListTables => &[ParamKey::Path],
            Self::ShowPermissions => &[ParamKey::Object],
            Self::GetTableDetails => &[ParamKey::Table],
            Self::SetOwner => &[ParamKey::Object, ParamKey::Owner],
            Self::Help | Self::Complex | Self::Unknown => &[],
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Keys of the canonical parameter record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKey {
    Name,
    Object,
    Path,
    Privilege,
    Principal,
    Owner,
    Catalog,
    Schema,
    Table,
}

impl ParamKey {
    /// The wire name of this key (matches the serde representation).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Object => "object",
            Self::Path => "path",
            Self::Privilege => "privilege",
            Self::Principal => "principal",
            Self::Owner => "owner",
            Self::Catalog => "catalog",
            Self::Schema => "schema",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for ParamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical named parameters extracted from user text.
///
/// Every field is optional; which fields an intent actually consumes is
/// declared by [`Intent::slots`], and per-intent aliases (create-catalog
/// accepts `name` or `catalog`, …) are resolved at dispatch time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntentParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privilege: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

impl IntentParams {
    /// Create an empty parameter record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the value stored under `key`.
    pub fn get(&self, key: ParamKey) -> Option<&str> {
        match key {
            ParamKey::Name => self.name.as_deref(),
            ParamKey::Object => self.object.as_deref(),
            ParamKey::Path => self.path.as_deref(),
            ParamKey::Privilege => self.privilege.as_deref(),
            ParamKey::Principal => self.principal.as_deref(),
            ParamKey::Owner => self.owner.as_deref(),
            ParamKey::Catalog => self.catalog.as_deref(),
            ParamKey::Schema => self.schema.as_deref(),
            ParamKey::Table => self.table.as_deref(),
        }
    }

    /// Store `value` under `key`.
    pub fn set(&mut self, key: ParamKey, value: impl Into<String>) {
        let value = Some(value.into());
        match key {
            ParamKey::Name => self.name = value,
            ParamKey::Object => self.object = value,
            ParamKey::Path => self.path = value,
            ParamKey::Privilege => self.privilege = value,
            ParamKey::Principal => self.principal = value,
            ParamKey::Owner => self.owner = value,
            ParamKey::Catalog => self.catalog = value,
            ParamKey::Schema => self.schema = value,
            ParamKey::Table => self.table = value,
        }
    }

    /// Store `value` under the field named `key`.
    ///
    /// Returns `false` (and stores nothing) when `key` is not a canonical
    /// field name.
    pub fn set_by_name(&mut self, key: &str, value: impl Into<String>) -> bool {
        let key = match key {
            "name" => ParamKey::Name,
            "object" => ParamKey::Object,
            "path" => ParamKey::Path,
            "privilege" => ParamKey::Privilege,
            "principal" => ParamKey::Principal,
            "owner" => ParamKey::Owner,
            "catalog" => ParamKey::Catalog,
            "schema" => ParamKey::Schema,
            "table" => ParamKey::Table,
            _ => return false,
        };
        self.set(key, value);
        true
    }

    /// The first populated value among `keys`, in the given order.
    ///
    /// This is how per-intent aliases are resolved (e.g. a create-catalog
    /// request may carry the catalog name under `name`, `catalog`, or
    /// `path`).
    pub fn first_of(&self, keys: &[ParamKey]) -> Option<&str> {
        keys.iter().find_map(|key| self.get(*key))
    }

    /// True when no field is populated.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.object.is_none()
            && self.path.is_none()
            && self.privilege.is_none()
            && self.principal.is_none()
            && self.owner.is_none()
            && self.catalog.is_none()
            && self.schema.is_none()
            && self.table.is_none()
    }
}

// ---------------------------------------------------------------------------
// Recognition output
// ---------------------------------------------------------------------------

/// The tier that produced a recognized intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentOrigin {
    /// Matched by an ordered regex rule.
    Rule,
    /// Recognized by the fallback semantic analyzer.
    Analyzer,
}

/// A recognized intent with its extracted parameters.
///
/// Produced once per request and discarded after dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedIntent {
    /// The recognized operation.
    pub intent: Intent,

    /// Parameters extracted from the text.
    pub params: IntentParams,

    /// Which tier produced this result.
    pub origin: IntentOrigin,

    /// Analyzer-provided summary of what will be done (rules never set it).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl ResolvedIntent {
    /// Create a recognized intent without an explanation.
    pub fn new(intent: Intent, params: IntentParams, origin: IntentOrigin) -> Self {
        Self {
            intent,
            params,
            origin,
            explanation: None,
        }
    }

    /// The help intent with empty parameters, the terminal degradation
    /// every recognition failure collapses to.
    pub fn help(origin: IntentOrigin) -> Self {
        Self::new(Intent::Help, IntentParams::new(), origin)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
