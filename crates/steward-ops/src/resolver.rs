//! Intent dispatch and SQL statement templates.
//!
//! [`Resolver::resolve`] maps every recognized intent to an
//! [`OperationResult`]: the SQL to run (when the intent produces any), a
//! display message, and an [`ActionDescriptor`] for the audit log.  Dispatch
//! is exhaustive over the intent vocabulary and total over parameter shapes:
//! missing or malformed parameters produce a clarification result, never an
//! error.
//!
//! Identifier casing is passed through exactly as received; the only case
//! transformation anywhere is upper-casing privilege names inside SQL.

use serde::{Deserialize, Serialize};
use tracing::debug;

use steward_intent::{Intent, IntentParams, ParamKey};

use crate::path::{ObjectPath, SecurableKind, is_valid_identifier};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Policy for create targets that arrive without a namespace qualifier
/// (a schema without its catalog, a table without catalog and schema).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnqualifiedNames {
    /// Pass the name through as given and let the backend decide.
    #[default]
    Allow,
    /// Ask the user to qualify the name instead of emitting SQL.
    Reject,
}

/// Tunables for resolution behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    /// How to treat under-qualified create targets.
    pub unqualified_names: UnqualifiedNames,
}

// ---------------------------------------------------------------------------
// Action descriptors
// ---------------------------------------------------------------------------

/// What a list operation enumerates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListTarget {
    Catalogs,
    Schemas,
    Tables,
}

/// Structured summary of a resolved operation, kept for the audit log.
///
/// Serializes with a lowercase `type` tag, e.g. a catalog creation becomes
/// `{"type":"create","object":"catalog","name":"sales"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActionDescriptor {
    /// A catalog, schema, or table was created.
    Create { object: SecurableKind, name: String },
    /// A privilege was granted.  `privilege` keeps the user's casing.
    Grant {
        privilege: String,
        object: String,
        principal: String,
    },
    /// A privilege was revoked.
    Revoke {
        privilege: String,
        object: String,
        principal: String,
    },
    /// Objects were enumerated, optionally under a parent namespace.
    List {
        object: ListTarget,
        #[serde(skip_serializing_if = "Option::is_none")]
        parent: Option<String>,
    },
    /// Grants on an object were shown.
    Show { target: String },
    /// Ownership was transferred.
    Owner { object: String, owner: String },
    /// A table was described.
    Describe { table: String },
    /// The capability listing was shown.
    Help,
    /// The request needs more detail before anything can run.
    Clarification,
    /// The intent is outside the vocabulary.
    Unknown,
}

// ---------------------------------------------------------------------------
// Operation results
// ---------------------------------------------------------------------------

/// The outcome of resolving one intent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationResult {
    /// The statement to execute, absent for help/clarification/unknown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,

    /// Human-readable confirmation or guidance.  Never empty.
    pub message: String,

    /// Structured summary for the audit log.
    pub action: ActionDescriptor,
}

impl OperationResult {
    fn statement(
        sql: impl Into<String>,
        message: impl Into<String>,
        action: ActionDescriptor,
    ) -> Self {
        Self {
            sql: Some(sql.into()),
            message: message.into(),
            action,
        }
    }

    fn notice(message: impl Into<String>, action: ActionDescriptor) -> Self {
        Self {
            sql: None,
            message: message.into(),
            action,
        }
    }

    fn clarification(message: impl Into<String>) -> Self {
        Self::notice(message, ActionDescriptor::Clarification)
    }
}

// ---------------------------------------------------------------------------
// Static replies
// ---------------------------------------------------------------------------

const HELP_TEXT: &str = r#"I can help you with Unity Catalog operations:

**Creating Objects:**
• Create a catalog: "Create a catalog named sales_catalog"
• Create a schema: "Create a schema named sales_catalog.analytics"
• Create a table: "Create a table named sales_catalog.analytics.customers"

**Managing Permissions:**
• Grant access: "Grant SELECT on sales_catalog.analytics to data_analysts"
• Revoke access: "Revoke MODIFY on sales_catalog.analytics.customers from john_doe"
• Show permissions: "Show permissions for sales_catalog.analytics"
• Set owner: "Set owner of sales_catalog to admin_user"

**Listing Objects:**
• List catalogs: "List all catalogs" or "Show catalogs"
• List schemas: "List schemas in sales_catalog"
• List tables: "Show tables in sales_catalog.analytics"

**Table Details:**
• Get table info: "Show details for sales_catalog.analytics.customers"

Just describe what you want to do in natural language!"#;

const COMPLEX_TEXT: &str = "This looks like a complex request. Let me break it down into steps. \
     Could you provide more details or rephrase the request?";

const UNKNOWN_TEXT: &str =
    "I'm not sure how to handle that request. Type \"help\" to see what I can do.";

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Stateless dispatcher from intents to operation results.
///
/// Resolution is a pure function of `(intent, params)` under fixed options:
/// resolving the same pair twice yields byte-identical SQL and messages.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    options: ResolverOptions,
}

/// Direction of a permission change; grant and revoke share a template.
#[derive(Debug, Clone, Copy)]
enum PermissionChange {
    Grant,
    Revoke,
}

impl Resolver {
    /// Create a resolver with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with explicit options.
    #[must_use]
    pub fn with_options(options: ResolverOptions) -> Self {
        Self { options }
    }

    /// The options this resolver runs under.
    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    /// Resolve one intent into SQL, a message, and an action descriptor.
    pub fn resolve(&self, intent: Intent, params: &IntentParams) -> OperationResult {
        debug!(intent = %intent, "resolving intent");

        match intent {
            Intent::CreateCatalog => self.create_catalog(params),
            Intent::CreateSchema => self.create_schema(params),
            Intent::CreateTable => self.create_table(params),
            Intent::GrantPermission => self.permission_change(params, PermissionChange::Grant),
            Intent::RevokePermission => self.permission_change(params, PermissionChange::Revoke),
            Intent::ListCatalogs => Self::list_catalogs(),
            Intent::ListSchemas => Self::list_schemas(params),
            Intent::ListTables => Self::list_tables(params),
            Intent::ShowPermissions => Self::show_permissions(params),
            Intent::GetTableDetails => Self::table_details(params),
            Intent::SetOwner => Self::set_owner(params),
            Intent::Help => OperationResult::notice(HELP_TEXT, ActionDescriptor::Help),
            Intent::Complex => OperationResult::notice(COMPLEX_TEXT, ActionDescriptor::Clarification),
            Intent::Unknown => OperationResult::notice(UNKNOWN_TEXT, ActionDescriptor::Unknown),
        }
    }

    // -- Creation ------------------------------------------------------------

    fn create_catalog(&self, params: &IntentParams) -> OperationResult {
        let Some(name) = params.first_of(&[ParamKey::Name, ParamKey::Catalog]) else {
            return OperationResult::clarification(
                "I need a name for the catalog. Try: \"Create a catalog named sales_catalog\".",
            );
        };
        if !is_valid_identifier(name) {
            return OperationResult::clarification(format!(
                "'{name}' is not a valid catalog name. Use only letters, digits, and underscores."
            ));
        }

        OperationResult::statement(
            format!("CREATE CATALOG IF NOT EXISTS {name}"),
            format!("Created catalog '{name}' successfully."),
            ActionDescriptor::Create {
                object: SecurableKind::Catalog,
                name: name.to_string(),
            },
        )
    }

    fn create_schema(&self, params: &IntentParams) -> OperationResult {
        let Some(raw) = params
            .first_of(&[ParamKey::Path, ParamKey::Name])
            .map(String::from)
            .or_else(|| schema_path(params))
        else {
            return OperationResult::clarification(
                "I need a schema path. Try: \"Create a schema named sales_catalog.analytics\".",
            );
        };

        let path = match ObjectPath::parse(&raw) {
            Ok(path) => path,
            Err(e) => return OperationResult::clarification(e.to_string()),
        };
        if path.depth() > 2 {
            return OperationResult::clarification(format!(
                "'{path}' is too deep for a schema. Use format: catalog.schema."
            ));
        }
        if path.depth() == 1 && self.options.unqualified_names == UnqualifiedNames::Reject {
            return OperationResult::clarification(format!(
                "Which catalog should hold '{path}'? Use format: catalog.schema."
            ));
        }

        OperationResult::statement(
            format!("CREATE SCHEMA IF NOT EXISTS {path}"),
            format!("Created schema '{path}' successfully."),
            ActionDescriptor::Create {
                object: SecurableKind::Schema,
                name: path.to_string(),
            },
        )
    }

    fn create_table(&self, params: &IntentParams) -> OperationResult {
        let Some(raw) = params
            .first_of(&[ParamKey::Path, ParamKey::Name])
            .map(String::from)
            .or_else(|| table_path(params))
        else {
            return OperationResult::clarification(
                "I need a table path. Try: \"Create a table named sales_catalog.analytics.customers\".",
            );
        };

        let path = match ObjectPath::parse(&raw) {
            Ok(path) => path,
            Err(e) => return OperationResult::clarification(e.to_string()),
        };
        if path.depth() < 3 && self.options.unqualified_names == UnqualifiedNames::Reject {
            return OperationResult::clarification(format!(
                "Which schema should hold '{path}'? Use format: catalog.schema.table."
            ));
        }

        OperationResult::statement(
            format!(
                "CREATE TABLE IF NOT EXISTS {path} (\n  id BIGINT GENERATED ALWAYS AS IDENTITY,\n  created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP(),\n  data STRING\n) USING DELTA"
            ),
            format!("Created table '{path}' with default schema. You can modify the schema as needed."),
            ActionDescriptor::Create {
                object: SecurableKind::Table,
                name: path.to_string(),
            },
        )
    }

    // -- Permissions ---------------------------------------------------------

    fn permission_change(
        &self,
        params: &IntentParams,
        change: PermissionChange,
    ) -> OperationResult {
        let privilege = params.get(ParamKey::Privilege);
        let object = params.first_of(&[ParamKey::Object, ParamKey::Path]);
        let principal = params.get(ParamKey::Principal);

        let (Some(privilege), Some(object), Some(principal)) = (privilege, object, principal)
        else {
            let example = match change {
                PermissionChange::Grant => "Grant SELECT on sales_catalog.analytics to data_analysts",
                PermissionChange::Revoke => {
                    "Revoke MODIFY on sales_catalog.analytics.customers from john_doe"
                }
            };
            return OperationResult::clarification(format!(
                "I need a privilege, an object, and a principal. Try: \"{example}\"."
            ));
        };

        if !is_valid_identifier(privilege) {
            return OperationResult::clarification(format!(
                "'{privilege}' is not a privilege I recognize. Try SELECT or MODIFY."
            ));
        }
        if !valid_principal(principal) {
            return OperationResult::clarification(format!(
                "'{principal}' is not a valid principal name."
            ));
        }
        let path = match ObjectPath::parse(object) {
            Ok(path) => path,
            Err(e) => return OperationResult::clarification(e.to_string()),
        };

        let upper = privilege.to_uppercase();
        match change {
            PermissionChange::Grant => OperationResult::statement(
                format!("GRANT {upper} ON {path} TO `{principal}`"),
                format!("Granted {privilege} permission on '{path}' to user '{principal}'."),
                ActionDescriptor::Grant {
                    privilege: privilege.to_string(),
                    object: path.to_string(),
                    principal: principal.to_string(),
                },
            ),
            PermissionChange::Revoke => OperationResult::statement(
                format!("REVOKE {upper} ON {path} FROM `{principal}`"),
                format!("Revoked {privilege} permission on '{path}' from user '{principal}'."),
                ActionDescriptor::Revoke {
                    privilege: privilege.to_string(),
                    object: path.to_string(),
                    principal: principal.to_string(),
                },
            ),
        }
    }

    // -- Discovery -----------------------------------------------------------

    fn list_catalogs() -> OperationResult {
        OperationResult::statement(
            "SHOW CATALOGS",
            "Here are the available catalogs. Run the SQL query to see the full list.",
            ActionDescriptor::List {
                object: ListTarget::Catalogs,
                parent: None,
            },
        )
    }

    fn list_schemas(params: &IntentParams) -> OperationResult {
        let Some(catalog) = params.first_of(&[ParamKey::Catalog, ParamKey::Name, ParamKey::Path])
        else {
            return OperationResult::clarification(
                "Which catalog should I look in? Try: \"List schemas in sales_catalog\".",
            );
        };
        if !is_valid_identifier(catalog) {
            return OperationResult::clarification(format!(
                "'{catalog}' is not a valid catalog name. Use only letters, digits, and underscores."
            ));
        }

        OperationResult::statement(
            format!("SHOW SCHEMAS IN {catalog}"),
            format!("Here are the schemas in catalog '{catalog}'."),
            ActionDescriptor::List {
                object: ListTarget::Schemas,
                parent: Some(catalog.to_string()),
            },
        )
    }

    fn list_tables(params: &IntentParams) -> OperationResult {
        let Some(raw) = params
            .first_of(&[ParamKey::Path])
            .map(String::from)
            .or_else(|| namespace_path(params))
        else {
            return OperationResult::clarification(
                "Which schema should I look in? Try: \"Show tables in sales_catalog.analytics\".",
            );
        };

        let path = match ObjectPath::parse(&raw) {
            Ok(path) => path,
            Err(e) => return OperationResult::clarification(e.to_string()),
        };
        if path.depth() > 2 {
            return OperationResult::clarification(format!(
                "'{path}' names a table, not a schema. Try: \"Show tables in sales_catalog.analytics\"."
            ));
        }

        OperationResult::statement(
            format!("SHOW TABLES IN {path}"),
            format!("Here are the tables in '{path}'."),
            ActionDescriptor::List {
                object: ListTarget::Tables,
                parent: Some(path.to_string()),
            },
        )
    }

    fn show_permissions(params: &IntentParams) -> OperationResult {
        let Some(object) = params.first_of(&[ParamKey::Object, ParamKey::Path]) else {
            return OperationResult::clarification(
                "Which object should I inspect? Try: \"Show permissions for sales_catalog.analytics\".",
            );
        };
        let path = match ObjectPath::parse(object) {
            Ok(path) => path,
            Err(e) => return OperationResult::clarification(e.to_string()),
        };

        OperationResult::statement(
            format!("SHOW GRANTS ON {path}"),
            format!("Here are the current permissions for '{path}'."),
            ActionDescriptor::Show {
                target: path.to_string(),
            },
        )
    }

    fn table_details(params: &IntentParams) -> OperationResult {
        let Some(table) = params.first_of(&[ParamKey::Table, ParamKey::Object, ParamKey::Path])
        else {
            return OperationResult::clarification(
                "Which table? Try: \"Show details for sales_catalog.analytics.customers\".",
            );
        };
        let path = match ObjectPath::parse(table) {
            Ok(path) => path,
            Err(e) => return OperationResult::clarification(e.to_string()),
        };
        if path.depth() != 3 {
            return OperationResult::clarification(
                "Invalid table path. Use format: catalog.schema.table",
            );
        }

        OperationResult::statement(
            format!("DESCRIBE TABLE EXTENDED {path}"),
            format!("Here are the details for table '{path}'."),
            ActionDescriptor::Describe {
                table: path.to_string(),
            },
        )
    }

    // -- Ownership -----------------------------------------------------------

    fn set_owner(params: &IntentParams) -> OperationResult {
        let object = params.first_of(&[ParamKey::Object, ParamKey::Path]);
        let owner = params.get(ParamKey::Owner);

        let (Some(object), Some(owner)) = (object, owner) else {
            return OperationResult::clarification(
                "I need an object and a new owner. Try: \"Set owner of sales_catalog to admin_user\".",
            );
        };
        if !valid_principal(owner) {
            return OperationResult::clarification(format!(
                "'{owner}' is not a valid owner name."
            ));
        }
        let path = match ObjectPath::parse(object) {
            Ok(path) => path,
            Err(e) => return OperationResult::clarification(e.to_string()),
        };

        // Depth heuristic, not a type check: a dotted path is assumed to be
        // a table, a bare name a catalog.  Schema-level owners (two parts)
        // come out as ALTER TABLE.
        // TODO: emit ALTER SCHEMA for two-part paths once the intended
        // semantics are confirmed.
        let securable = if path.depth() == 1 { "CATALOG" } else { "TABLE" };

        OperationResult::statement(
            format!("ALTER {securable} {path} OWNER TO `{owner}`"),
            format!("Set owner of '{path}' to '{owner}'."),
            ActionDescriptor::Owner {
                object: path.to_string(),
                owner: owner.to_string(),
            },
        )
    }
}

// ---------------------------------------------------------------------------
// Parameter normalization helpers
// ---------------------------------------------------------------------------

/// Assemble a schema path from split `catalog`/`schema` fields.
fn schema_path(params: &IntentParams) -> Option<String> {
    match (params.get(ParamKey::Catalog), params.get(ParamKey::Schema)) {
        (Some(catalog), Some(schema)) => Some(format!("{catalog}.{schema}")),
        (None, Some(schema)) => Some(schema.to_string()),
        // A dotted value in `catalog` alone is already a full schema path.
        (Some(catalog), None) if catalog.contains('.') => Some(catalog.to_string()),
        _ => None,
    }
}

/// Assemble a table path from split `catalog`/`schema`/`table` fields.
/// A dotted `table` value is taken as a full path on its own.
fn table_path(params: &IntentParams) -> Option<String> {
    let table = params.get(ParamKey::Table)?;
    if table.contains('.') {
        return Some(table.to_string());
    }
    match (params.get(ParamKey::Catalog), params.get(ParamKey::Schema)) {
        (Some(catalog), Some(schema)) => Some(format!("{catalog}.{schema}.{table}")),
        (None, Some(schema)) => Some(format!("{schema}.{table}")),
        _ => Some(table.to_string()),
    }
}

/// Assemble a catalog or catalog.schema namespace from split fields.
fn namespace_path(params: &IntentParams) -> Option<String> {
    match (params.get(ParamKey::Catalog), params.get(ParamKey::Schema)) {
        (Some(catalog), Some(schema)) => Some(format!("{catalog}.{schema}")),
        (None, Some(schema)) => Some(schema.to_string()),
        (Some(catalog), None) => Some(catalog.to_string()),
        (None, None) => None,
    }
}

/// Principals and owners end up backtick-quoted in SQL, so the only hard
/// requirement is that they are non-empty and backtick-free.
fn valid_principal(s: &str) -> bool {
    !s.is_empty() && !s.contains('`')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolver() -> Resolver {
        Resolver::new()
    }

    fn params_with(fields: &[(ParamKey, &str)]) -> IntentParams {
        let mut params = IntentParams::new();
        for (key, value) in fields {
            params.set(*key, *value);
        }
        params
    }

    #[test]
    fn create_catalog_statement_and_action() {
        let params = params_with(&[(ParamKey::Name, "sales")]);
        let result = resolver().resolve(Intent::CreateCatalog, &params);

        assert_eq!(result.sql.as_deref(), Some("CREATE CATALOG IF NOT EXISTS sales"));
        assert_eq!(result.message, "Created catalog 'sales' successfully.");
        assert_eq!(
            serde_json::to_value(&result.action).unwrap(),
            json!({"type": "create", "object": "catalog", "name": "sales"})
        );
    }

    #[test]
    fn create_catalog_accepts_catalog_alias() {
        let params = params_with(&[(ParamKey::Catalog, "sales_data")]);
        let result = resolver().resolve(Intent::CreateCatalog, &params);

        assert_eq!(
            result.sql.as_deref(),
            Some("CREATE CATALOG IF NOT EXISTS sales_data")
        );
    }

    #[test]
    fn create_schema_from_path_and_from_split_fields() {
        let by_path = params_with(&[(ParamKey::Path, "sales.analytics")]);
        let split = params_with(&[(ParamKey::Catalog, "sales"), (ParamKey::Schema, "analytics")]);

        let resolver = resolver();
        let a = resolver.resolve(Intent::CreateSchema, &by_path);
        let b = resolver.resolve(Intent::CreateSchema, &split);

        assert_eq!(a.sql.as_deref(), Some("CREATE SCHEMA IF NOT EXISTS sales.analytics"));
        assert_eq!(a.sql, b.sql);
        assert_eq!(a.message, "Created schema 'sales.analytics' successfully.");
    }

    #[test]
    fn create_schema_accepts_dotted_catalog_field() {
        // Some analyzer replies stuff the whole path into `catalog`.
        let params = params_with(&[(ParamKey::Catalog, "sales.analytics")]);
        let result = resolver().resolve(Intent::CreateSchema, &params);

        assert_eq!(result.sql.as_deref(), Some("CREATE SCHEMA IF NOT EXISTS sales.analytics"));
    }

    #[test]
    fn create_table_emits_default_ddl() {
        let params = params_with(&[(ParamKey::Path, "sales.analytics.orders")]);
        let result = resolver().resolve(Intent::CreateTable, &params);

        assert_eq!(
            result.sql.as_deref(),
            Some(
                "CREATE TABLE IF NOT EXISTS sales.analytics.orders (\n  id BIGINT GENERATED ALWAYS AS IDENTITY,\n  created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP(),\n  data STRING\n) USING DELTA"
            )
        );
        assert_eq!(
            result.message,
            "Created table 'sales.analytics.orders' with default schema. You can modify the schema as needed."
        );
        assert_eq!(
            result.action,
            ActionDescriptor::Create {
                object: SecurableKind::Table,
                name: "sales.analytics.orders".to_string()
            }
        );
    }

    #[test]
    fn create_table_joins_split_fields() {
        let params = params_with(&[
            (ParamKey::Catalog, "sales"),
            (ParamKey::Schema, "analytics"),
            (ParamKey::Table, "orders"),
        ]);
        let result = resolver().resolve(Intent::CreateTable, &params);

        let sql = result.sql.unwrap();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS sales.analytics.orders ("));
    }

    #[test]
    fn dotted_table_field_is_a_full_path() {
        let params = params_with(&[(ParamKey::Table, "sales.analytics.orders")]);
        let result = resolver().resolve(Intent::CreateTable, &params);

        let sql = result.sql.unwrap();
        assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS sales.analytics.orders ("));
    }

    #[test]
    fn grant_uppercases_sql_but_not_message() {
        let params = params_with(&[
            (ParamKey::Privilege, "select"),
            (ParamKey::Object, "sales.customers"),
            (ParamKey::Principal, "data_analyst"),
        ]);
        let result = resolver().resolve(Intent::GrantPermission, &params);

        assert_eq!(
            result.sql.as_deref(),
            Some("GRANT SELECT ON sales.customers TO `data_analyst`")
        );
        assert_eq!(
            result.message,
            "Granted select permission on 'sales.customers' to user 'data_analyst'."
        );
        assert_eq!(
            result.action,
            ActionDescriptor::Grant {
                privilege: "select".to_string(),
                object: "sales.customers".to_string(),
                principal: "data_analyst".to_string()
            }
        );
    }

    #[test]
    fn revoke_mirrors_grant_with_from() {
        let params = params_with(&[
            (ParamKey::Privilege, "MODIFY"),
            (ParamKey::Object, "sales.orders"),
            (ParamKey::Principal, "john_doe"),
        ]);
        let result = resolver().resolve(Intent::RevokePermission, &params);

        assert_eq!(
            result.sql.as_deref(),
            Some("REVOKE MODIFY ON sales.orders FROM `john_doe`")
        );
        assert_eq!(
            result.message,
            "Revoked MODIFY permission on 'sales.orders' from user 'john_doe'."
        );
    }

    #[test]
    fn grant_accepts_path_alias_for_object() {
        let params = params_with(&[
            (ParamKey::Privilege, "SELECT"),
            (ParamKey::Path, "sales"),
            (ParamKey::Principal, "bob"),
        ]);
        let result = resolver().resolve(Intent::GrantPermission, &params);

        assert_eq!(result.sql.as_deref(), Some("GRANT SELECT ON sales TO `bob`"));
    }

    #[test]
    fn identifier_casing_is_preserved() {
        let params = params_with(&[
            (ParamKey::Privilege, "select"),
            (ParamKey::Object, "Sales.Customers"),
            (ParamKey::Principal, "Bob"),
        ]);
        let result = resolver().resolve(Intent::GrantPermission, &params);

        assert_eq!(
            result.sql.as_deref(),
            Some("GRANT SELECT ON Sales.Customers TO `Bob`")
        );
    }

    #[test]
    fn list_catalogs_needs_no_params() {
        let result = resolver().resolve(Intent::ListCatalogs, &IntentParams::new());

        assert_eq!(result.sql.as_deref(), Some("SHOW CATALOGS"));
        assert_eq!(
            result.action,
            ActionDescriptor::List {
                object: ListTarget::Catalogs,
                parent: None
            }
        );
        assert_eq!(
            serde_json::to_value(&result.action).unwrap(),
            json!({"type": "list", "object": "catalogs"})
        );
    }

    #[test]
    fn list_schemas_in_catalog() {
        let params = params_with(&[(ParamKey::Catalog, "sales")]);
        let result = resolver().resolve(Intent::ListSchemas, &params);

        assert_eq!(result.sql.as_deref(), Some("SHOW SCHEMAS IN sales"));
        assert_eq!(result.message, "Here are the schemas in catalog 'sales'.");
    }

    #[test]
    fn list_schemas_rejects_dotted_catalog() {
        let params = params_with(&[(ParamKey::Catalog, "sales.analytics")]);
        let result = resolver().resolve(Intent::ListSchemas, &params);

        assert!(result.sql.is_none());
        assert_eq!(result.action, ActionDescriptor::Clarification);
    }

    #[test]
    fn list_tables_in_schema() {
        let params = params_with(&[(ParamKey::Path, "sales.analytics")]);
        let result = resolver().resolve(Intent::ListTables, &params);

        assert_eq!(result.sql.as_deref(), Some("SHOW TABLES IN sales.analytics"));
        assert_eq!(
            result.action,
            ActionDescriptor::List {
                object: ListTarget::Tables,
                parent: Some("sales.analytics".to_string())
            }
        );
    }

    #[test]
    fn list_tables_rejects_table_depth_path() {
        let params = params_with(&[(ParamKey::Path, "sales.analytics.orders")]);
        let result = resolver().resolve(Intent::ListTables, &params);

        assert!(result.sql.is_none());
        assert_eq!(result.action, ActionDescriptor::Clarification);
    }

    #[test]
    fn show_permissions_on_object() {
        let params = params_with(&[(ParamKey::Object, "sales.customers")]);
        let result = resolver().resolve(Intent::ShowPermissions, &params);

        assert_eq!(result.sql.as_deref(), Some("SHOW GRANTS ON sales.customers"));
        assert_eq!(
            result.message,
            "Here are the current permissions for 'sales.customers'."
        );
    }

    #[test]
    fn table_details_requires_three_parts() {
        let resolver = resolver();

        let full = params_with(&[(ParamKey::Table, "sales.analytics.orders")]);
        let result = resolver.resolve(Intent::GetTableDetails, &full);
        assert_eq!(
            result.sql.as_deref(),
            Some("DESCRIBE TABLE EXTENDED sales.analytics.orders")
        );

        let partial = params_with(&[(ParamKey::Table, "analytics.orders")]);
        let result = resolver.resolve(Intent::GetTableDetails, &partial);
        assert!(result.sql.is_none());
        assert_eq!(result.message, "Invalid table path. Use format: catalog.schema.table");
    }

    #[test]
    fn set_owner_dotted_path_alters_table() {
        let params = params_with(&[
            (ParamKey::Object, "sales.customers"),
            (ParamKey::Owner, "admin_user"),
        ]);
        let result = resolver().resolve(Intent::SetOwner, &params);

        assert_eq!(
            result.sql.as_deref(),
            Some("ALTER TABLE sales.customers OWNER TO `admin_user`")
        );
        assert_eq!(result.message, "Set owner of 'sales.customers' to 'admin_user'.");
    }

    #[test]
    fn set_owner_bare_name_alters_catalog() {
        let params = params_with(&[
            (ParamKey::Object, "sales_catalog"),
            (ParamKey::Owner, "admin_user"),
        ]);
        let result = resolver().resolve(Intent::SetOwner, &params);

        assert_eq!(
            result.sql.as_deref(),
            Some("ALTER CATALOG sales_catalog OWNER TO `admin_user`")
        );
    }

    #[test]
    fn help_lists_capabilities_without_sql() {
        let result = resolver().resolve(Intent::Help, &IntentParams::new());

        assert!(result.sql.is_none());
        assert!(result.message.contains("Unity Catalog operations"));
        assert!(result.message.contains("Grant SELECT"));
        assert_eq!(result.action, ActionDescriptor::Help);
    }

    #[test]
    fn complex_asks_for_details() {
        let result = resolver().resolve(Intent::Complex, &IntentParams::new());

        assert!(result.sql.is_none());
        assert!(result.message.contains("complex request"));
        assert_eq!(result.action, ActionDescriptor::Clarification);
    }

    #[test]
    fn unknown_intent_is_a_defined_result() {
        let result = resolver().resolve(Intent::Unknown, &IntentParams::new());

        assert!(result.sql.is_none());
        assert!(!result.message.is_empty());
        assert_eq!(result.action, ActionDescriptor::Unknown);
        assert_eq!(
            serde_json::to_value(&result.action).unwrap(),
            json!({"type": "unknown"})
        );
    }

    #[test]
    fn missing_params_ask_for_clarification() {
        let resolver = resolver();
        let empty = IntentParams::new();

        for intent in [
            Intent::CreateCatalog,
            Intent::CreateSchema,
            Intent::CreateTable,
            Intent::GrantPermission,
            Intent::RevokePermission,
            Intent::ListSchemas,
            Intent::ListTables,
            Intent::ShowPermissions,
            Intent::GetTableDetails,
            Intent::SetOwner,
        ] {
            let result = resolver.resolve(intent, &empty);
            assert!(result.sql.is_none(), "{intent} should not emit SQL");
            assert_eq!(result.action, ActionDescriptor::Clarification, "{intent}");
            assert!(!result.message.is_empty(), "{intent}");
        }
    }

    #[test]
    fn malformed_identifiers_ask_for_clarification() {
        let resolver = resolver();

        let bad_name = params_with(&[(ParamKey::Name, "sales-data")]);
        let result = resolver.resolve(Intent::CreateCatalog, &bad_name);
        assert!(result.sql.is_none());

        let bad_path = params_with(&[(ParamKey::Path, "sales..analytics")]);
        let result = resolver.resolve(Intent::CreateSchema, &bad_path);
        assert!(result.sql.is_none());

        let bad_privilege = params_with(&[
            (ParamKey::Privilege, "all privileges"),
            (ParamKey::Object, "sales"),
            (ParamKey::Principal, "bob"),
        ]);
        let result = resolver.resolve(Intent::GrantPermission, &bad_privilege);
        assert!(result.sql.is_none());

        let bad_principal = params_with(&[
            (ParamKey::Privilege, "SELECT"),
            (ParamKey::Object, "sales"),
            (ParamKey::Principal, "bob`; DROP"),
        ]);
        let result = resolver.resolve(Intent::GrantPermission, &bad_principal);
        assert!(result.sql.is_none());
        assert_eq!(result.action, ActionDescriptor::Clarification);
    }

    #[test]
    fn reject_mode_requires_qualified_names() {
        let resolver = Resolver::with_options(ResolverOptions {
            unqualified_names: UnqualifiedNames::Reject,
        });

        let bare_schema = params_with(&[(ParamKey::Path, "staging")]);
        let result = resolver.resolve(Intent::CreateSchema, &bare_schema);
        assert!(result.sql.is_none());
        assert_eq!(result.action, ActionDescriptor::Clarification);

        let partial_table = params_with(&[(ParamKey::Path, "staging.events")]);
        let result = resolver.resolve(Intent::CreateTable, &partial_table);
        assert!(result.sql.is_none());

        let qualified = params_with(&[(ParamKey::Path, "sales.staging")]);
        let result = resolver.resolve(Intent::CreateSchema, &qualified);
        assert_eq!(result.sql.as_deref(), Some("CREATE SCHEMA IF NOT EXISTS sales.staging"));
    }

    #[test]
    fn allow_mode_passes_bare_names_through() {
        let resolver = resolver();

        let bare_schema = params_with(&[(ParamKey::Path, "staging")]);
        let result = resolver.resolve(Intent::CreateSchema, &bare_schema);
        assert_eq!(result.sql.as_deref(), Some("CREATE SCHEMA IF NOT EXISTS staging"));
    }

    #[test]
    fn resolution_is_deterministic() {
        let resolver = resolver();
        let params = params_with(&[
            (ParamKey::Privilege, "SELECT"),
            (ParamKey::Object, "sales.customers"),
            (ParamKey::Principal, "data_analyst"),
        ]);

        let first = resolver.resolve(Intent::GrantPermission, &params);
        let second = resolver.resolve(Intent::GrantPermission, &params);

        assert_eq!(first, second);
    }
}
