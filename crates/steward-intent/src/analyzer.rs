//! Completion-backed semantic analyzer.
//!
//! The fallback stage of the recognition pipeline: text no rule could place
//! is sent to the completion API with a structured system prompt, and the
//! reply is parsed back into a [`ResolvedIntent`].  The analyzer never fails
//! outward: transport errors, replies without JSON, malformed JSON, and
//! unrecognized intent names all degrade to a `help` resolution so the
//! pipeline stays total.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use steward_agent::{CompletionClient, CompletionRequest, Message};

use crate::interpreter::IntentSource;
use crate::types::{Intent, IntentOrigin, IntentParams, ResolvedIntent};

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

/// System prompt instructing the model to emit a single JSON object.
const ANALYZER_PROMPT: &str = r#"You are a Unity Catalog assistant that converts natural language requests into structured intents.

Analyze the user's message and respond with a JSON object in this exact format:
{
  "intent": "<intent name>",
  "params": { <parameters> },
  "explanation": "<brief explanation of what you understood>"
}

Available intents:
- createCatalog: create a new catalog (params: name)
- createSchema: create a schema (params: path as "catalog.schema")
- createTable: create a table (params: path as "catalog.schema.table")
- grantPermission: grant a privilege (params: privilege, object, principal)
- revokePermission: revoke a privilege (params: privilege, object, principal)
- listCatalogs: list all catalogs (no params)
- listSchemas: list schemas in a catalog (params: catalog)
- listTables: list tables in a schema (params: path as "catalog.schema")
- showPermissions: show grants on an object (params: object)
- getTableDetails: describe a table (params: table as "catalog.schema.table")
- setOwner: change an object's owner (params: object, owner)
- help: the user is asking what you can do
- complex: the request needs multiple operations or does not fit a single intent

Parameter values are always strings. Use only these parameter names: name, object, path, privilege, principal, owner, catalog, schema, table.

Examples:

User: "Create a catalog called sales_data"
{"intent": "createCatalog", "params": {"name": "sales_data"}, "explanation": "Creating a new catalog named sales_data"}

User: "Give the analytics team read access to hr.employees"
{"intent": "grantPermission", "params": {"privilege": "SELECT", "object": "hr.employees", "principal": "analytics_team"}, "explanation": "Granting SELECT on hr.employees to analytics_team"}

Always return valid JSON only, no additional text."#;

/// Explanation attached when the analyzer has to give up on a request.
const FALLBACK_EXPLANATION: &str = "I couldn't understand that request. Please rephrase.";

// ---------------------------------------------------------------------------
// Analyzer
// ---------------------------------------------------------------------------

/// Semantic analyzer backed by a [`CompletionClient`].
#[derive(Debug, Clone)]
pub struct CompletionAnalyzer {
    client: CompletionClient,
}

impl CompletionAnalyzer {
    /// Create an analyzer over an existing client.
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }

    /// Analyze `text` into a resolved intent.
    ///
    /// Always returns a result; failures degrade to `help` with the
    /// fallback explanation.
    pub async fn analyze(&self, text: &str) -> ResolvedIntent {
        let request = CompletionRequest {
            model: String::new(),
            system: Some(ANALYZER_PROMPT.to_string()),
            messages: vec![Message::user(text)],
            max_tokens: None,
            temperature: Some(0.0),
        };

        match self.client.complete(&request).await {
            Ok(reply) => self.parse_reply(&reply),
            Err(e) => {
                warn!(error = %e, "completion request failed, degrading to help");
                fallback_help()
            }
        }
    }

    /// Parse a raw completion reply into a resolved intent.
    ///
    /// The reply should be a bare JSON object, but models decorate output
    /// with prose and code fences; the first balanced region that parses as
    /// a JSON object is taken, the rest is ignored.
    fn parse_reply(&self, reply: &str) -> ResolvedIntent {
        let Some(value) = extract_json_object(reply) else {
            warn!("no JSON object in completion reply, degrading to help");
            return fallback_help();
        };

        let parsed: AnalyzerReply = match serde_json::from_value(value) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "malformed analyzer reply, degrading to help");
                return fallback_help();
            }
        };

        let params = params_from_value(parsed.intent, &parsed.params);
        debug!(intent = %parsed.intent, "analyzer resolved intent");

        let mut resolved = ResolvedIntent::new(parsed.intent, params, IntentOrigin::Analyzer);
        resolved.explanation = parsed.explanation.filter(|s| !s.is_empty());
        resolved
    }
}

#[async_trait]
impl IntentSource for CompletionAnalyzer {
    async fn interpret(&self, text: &str) -> Option<ResolvedIntent> {
        Some(self.analyze(text).await)
    }
}

/// The reply shape the prompt asks for.  `params` stays loose on purpose:
/// models sometimes return an array instead of an object, and both forms
/// are normalized by [`params_from_value`].
#[derive(Debug, Deserialize)]
struct AnalyzerReply {
    intent: Intent,
    #[serde(default)]
    params: Value,
    #[serde(default)]
    explanation: Option<String>,
}

fn fallback_help() -> ResolvedIntent {
    let mut resolved = ResolvedIntent::help(IntentOrigin::Analyzer);
    resolved.explanation = Some(FALLBACK_EXPLANATION.to_string());
    resolved
}

// ---------------------------------------------------------------------------
// Reply normalization
// ---------------------------------------------------------------------------

/// Normalize the reply's `params` value into the canonical record.
///
/// Objects are copied field by field (unknown field names are dropped);
/// arrays are positional and zip against the intent's declared slot order.
/// Non-string values are ignored in both forms.
fn params_from_value(intent: Intent, value: &Value) -> IntentParams {
    let mut params = IntentParams::new();

    match value {
        Value::Object(map) => {
            for (key, v) in map {
                if let Some(s) = v.as_str()
                    && !params.set_by_name(key, s)
                {
                    debug!(field = %key, "dropping unknown parameter field");
                }
            }
        }
        Value::Array(items) => {
            for (slot, v) in intent.slots().iter().zip(items) {
                if let Some(s) = v.as_str() {
                    params.set(*slot, s);
                }
            }
        }
        _ => {}
    }

    params
}

/// Extract the first balanced `{...}` region of `text` that parses as a
/// JSON object.
///
/// Scanning is string-aware, so braces inside JSON string literals do not
/// count toward nesting.  Regions that balance but fail to parse are
/// skipped and the scan continues from the next `{`.
fn extract_json_object(text: &str) -> Option<Value> {
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        search_from = start + 1;

        if let Some(region) = balanced_region(&text[start..])
            && let Ok(value) = serde_json::from_str::<Value>(region)
            && value.is_object()
        {
            return Some(value);
        }
    }

    None
}

/// The shortest prefix of `text` (which starts at a `{`) whose braces
/// balance, or `None` if the braces never close.
fn balanced_region(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                if depth == 0 {
                    return None;
                }
                depth -= 1;
                if depth == 0 {
                    return Some(&text[..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ParamKey;
    use steward_agent::AgentConfig;

    fn analyzer() -> CompletionAnalyzer {
        let client = CompletionClient::new(AgentConfig::new("sk-ant-test-key")).unwrap();
        CompletionAnalyzer::new(client)
    }

    #[test]
    fn parses_bare_json_reply() {
        let reply = r#"{"intent": "createCatalog", "params": {"name": "sales"}, "explanation": "Creating catalog sales"}"#;
        let resolved = analyzer().parse_reply(reply);

        assert_eq!(resolved.intent, Intent::CreateCatalog);
        assert_eq!(resolved.params.name.as_deref(), Some("sales"));
        assert_eq!(resolved.origin, IntentOrigin::Analyzer);
        assert_eq!(resolved.explanation.as_deref(), Some("Creating catalog sales"));
    }

    #[test]
    fn parses_reply_wrapped_in_prose() {
        let reply = concat!(
            "Sure! Here is the structured intent you asked for:\n\n",
            r#"{"intent": "listSchemas", "params": {"catalog": "sales"}}"#,
            "\n\nLet me know if you need anything else."
        );
        let resolved = analyzer().parse_reply(reply);

        assert_eq!(resolved.intent, Intent::ListSchemas);
        assert_eq!(resolved.params.catalog.as_deref(), Some("sales"));
        assert!(resolved.explanation.is_none());
    }

    #[test]
    fn parses_reply_inside_code_fence() {
        let reply = "```json\n{\"intent\": \"listCatalogs\", \"params\": {}}\n```";
        let resolved = analyzer().parse_reply(reply);

        assert_eq!(resolved.intent, Intent::ListCatalogs);
        assert!(resolved.params.is_empty());
    }

    #[test]
    fn positional_params_zip_against_slots() {
        let reply = r#"{"intent": "grantPermission", "params": ["SELECT", "sales.customers", "bob"]}"#;
        let resolved = analyzer().parse_reply(reply);

        assert_eq!(resolved.intent, Intent::GrantPermission);
        assert_eq!(resolved.params.privilege.as_deref(), Some("SELECT"));
        assert_eq!(resolved.params.object.as_deref(), Some("sales.customers"));
        assert_eq!(resolved.params.principal.as_deref(), Some("bob"));
    }

    #[test]
    fn extra_positional_params_are_dropped() {
        let reply = r#"{"intent": "createCatalog", "params": ["sales", "spurious"]}"#;
        let resolved = analyzer().parse_reply(reply);

        assert_eq!(resolved.params.name.as_deref(), Some("sales"));
        assert_eq!(
            resolved.params.first_of(&[
                ParamKey::Object,
                ParamKey::Path,
                ParamKey::Catalog
            ]),
            None
        );
    }

    #[test]
    fn unknown_intent_name_becomes_unknown() {
        let reply = r#"{"intent": "deleteEverything", "params": {}}"#;
        let resolved = analyzer().parse_reply(reply);

        assert_eq!(resolved.intent, Intent::Unknown);
    }

    #[test]
    fn reply_without_json_degrades_to_help() {
        let resolved = analyzer().parse_reply("I'm sorry, I can't help with that.");

        assert_eq!(resolved.intent, Intent::Help);
        assert_eq!(resolved.origin, IntentOrigin::Analyzer);
        assert_eq!(resolved.explanation.as_deref(), Some(FALLBACK_EXPLANATION));
    }

    #[test]
    fn unparseable_json_degrades_to_help() {
        let resolved = analyzer().parse_reply(r#"{"intent": incomplete"#);
        assert_eq!(resolved.intent, Intent::Help);
    }

    #[test]
    fn skips_unparseable_region_for_a_later_one() {
        let reply = r#"{oops} {"intent": "listCatalogs", "params": {}}"#;
        let resolved = analyzer().parse_reply(reply);

        assert_eq!(resolved.intent, Intent::ListCatalogs);
    }

    #[test]
    fn extraction_ignores_braces_inside_strings() {
        let value = extract_json_object(
            r#"{"intent": "help", "params": {}, "explanation": "try {braces} here"}"#,
        )
        .unwrap();

        assert_eq!(value["explanation"], "try {braces} here");
    }

    #[test]
    fn extraction_handles_escaped_quotes() {
        let value =
            extract_json_object(r#"{"explanation": "say \"hi\" to {everyone}"}"#).unwrap();
        assert_eq!(value["explanation"], r#"say "hi" to {everyone}"#);
    }

    #[test]
    fn unbalanced_text_yields_nothing() {
        assert!(extract_json_object("{\"open\": ").is_none());
        assert!(extract_json_object("no json here").is_none());
        assert!(extract_json_object("}{").is_none());
    }

    #[test]
    fn non_string_param_values_are_ignored() {
        let reply = r#"{"intent": "createCatalog", "params": {"name": 42}}"#;
        let resolved = analyzer().parse_reply(reply);

        assert_eq!(resolved.intent, Intent::CreateCatalog);
        assert!(resolved.params.is_empty());
    }

    #[test]
    fn empty_explanation_is_normalized_away() {
        let reply = r#"{"intent": "listCatalogs", "params": {}, "explanation": ""}"#;
        let resolved = analyzer().parse_reply(reply);

        assert!(resolved.explanation.is_none());
    }
}
