//! Ordered rule matcher.
//!
//! Rules are case-insensitive regexes with named capture groups, evaluated
//! top to bottom against the raw text; the first match wins and later rules
//! are not consulted.  Patterns are substring-anchored, so a command embedded
//! in a longer sentence still matches.  Captured values keep the user's
//! casing; any case normalization is the dispatcher's business.

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;

use crate::error::{IntentError, Result};
use crate::interpreter::IntentSource;
use crate::types::{Intent, IntentOrigin, IntentParams, ParamKey, ResolvedIntent};

// ---------------------------------------------------------------------------
// Default rule set
// ---------------------------------------------------------------------------

/// The built-in rules, in evaluation order.
///
/// Declaration order is a documented contract: `createSchema` is consulted
/// before `createTable`, `listCatalogs` before `listSchemas`, and the
/// whole-input `help` rule comes last so it can never shadow a longer
/// command that merely mentions help.
const DEFAULT_RULES: &[(Intent, &str)] = &[
    (
        Intent::CreateCatalog,
        r#"(?i)create\s+(?:(?:a|the)\s+)?catalog\s+(?:named\s+)?["']?(?P<name>\w+)["']?"#,
    ),
    (
        Intent::CreateSchema,
        r#"(?i)create\s+(?:(?:a|the)\s+)?schema\s+(?:named\s+)?["']?(?P<path>\w+(?:\.\w+)?)["']?"#,
    ),
    (
        Intent::CreateTable,
        r#"(?i)create\s+(?:(?:a|the)\s+)?table\s+(?:named\s+)?["']?(?P<path>[\w.]+)["']?"#,
    ),
    (
        Intent::GrantPermission,
        r#"(?i)grant\s+(?P<privilege>\w+)\s+(?:(?:permission|access|privileges?)\s+)?(?:on\s+)?["']?(?P<object>[\w.]+)["']?\s+to\s+(?:user\s+)?["']?(?P<principal>\w+)["']?"#,
    ),
    (
        Intent::RevokePermission,
        r#"(?i)revoke\s+(?P<privilege>\w+)\s+(?:(?:permission|access|privileges?)\s+)?(?:on\s+)?["']?(?P<object>[\w.]+)["']?\s+from\s+(?:user\s+)?["']?(?P<principal>\w+)["']?"#,
    ),
    (Intent::ListCatalogs, r"(?i)(?:list|show)\s+(?:all\s+)?catalogs?"),
    (
        Intent::ListSchemas,
        r#"(?i)list\s+schemas?\s+(?:in\s+)?["']?(?P<catalog>\w+)["']?"#,
    ),
    (
        Intent::ShowPermissions,
        r#"(?i)show\s+permissions?\s+(?:for\s+)?["']?(?P<object>[\w.]+)["']?"#,
    ),
    (
        Intent::SetOwner,
        r#"(?i)set\s+owner\s+(?:of\s+)?["']?(?P<object>[\w.]+)["']?\s+to\s+["']?(?P<owner>\w+)["']?"#,
    ),
    (
        Intent::ListTables,
        r#"(?i)(?:list|show)\s+tables?\s+(?:in\s+)?["']?(?P<path>[\w.]+)["']?"#,
    ),
    (
        Intent::GetTableDetails,
        r#"(?i)(?:show\s+details?\s+(?:for\s+)?|describe\s+(?:table\s+)?)["']?(?P<table>[\w.]+)["']?"#,
    ),
    // The only anchored rule: `help` alone is answered locally instead of
    // being escalated to the analyzer.
    (Intent::Help, r"(?i)^\s*help\s*$"),
];

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// A single recognition rule: an intent and the pattern that detects it.
#[derive(Debug, Clone)]
pub struct IntentRule {
    /// The intent this rule produces.
    pub intent: Intent,
    /// The original pattern string (kept for diagnostics and discovery).
    pub pattern: String,
    /// The compiled regex.
    compiled: Regex,
}

impl IntentRule {
    /// The parameter slots this rule's intent consumes, in declared order.
    pub fn slots(&self) -> &'static [ParamKey] {
        self.intent.slots()
    }
}

// ---------------------------------------------------------------------------
// RuleMatcher
// ---------------------------------------------------------------------------

/// Ordered first-match-wins rule matcher over free text.
///
/// Matching is pure: no side effects, `None` means "no rule matched" and the
/// caller decides whether to escalate.
#[derive(Debug, Clone)]
pub struct RuleMatcher {
    rules: Vec<IntentRule>,
}

impl RuleMatcher {
    /// Create an empty matcher with no rules registered.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create a matcher loaded with the built-in rule set.
    pub fn with_default_rules() -> Result<Self> {
        let mut matcher = Self::new();
        for (intent, pattern) in DEFAULT_RULES {
            matcher.add_rule(*intent, *pattern)?;
        }
        Ok(matcher)
    }

    /// Append a rule to the evaluation order.
    ///
    /// The pattern may contain named captures (e.g. `(?P<name>...)`) whose
    /// names must be canonical parameter fields.  Returns an error if the
    /// regex fails to compile.
    pub fn add_rule(&mut self, intent: Intent, pattern: impl Into<String>) -> Result<()> {
        let pattern = pattern.into();

        let compiled = Regex::new(&pattern).map_err(|e| IntentError::InvalidPattern {
            pattern: pattern.clone(),
            reason: e.to_string(),
        })?;

        debug!(intent = %intent, pattern = %pattern, "rule added");

        self.rules.push(IntentRule {
            intent,
            pattern,
            compiled,
        });

        Ok(())
    }

    /// The registered rules in evaluation order.
    pub fn rules(&self) -> &[IntentRule] {
        &self.rules
    }

    /// The number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate the rules in order against `text`.
    ///
    /// Returns the first rule's intent with its named captures as
    /// parameters, or `None` when no rule matches.
    pub fn match_text(&self, text: &str) -> Option<ResolvedIntent> {
        for rule in &self.rules {
            if let Some(caps) = rule.compiled.captures(text) {
                let mut params = IntentParams::new();
                for name in rule.compiled.capture_names().flatten() {
                    if let Some(m) = caps.name(name) {
                        params.set_by_name(name, m.as_str());
                    }
                }

                debug!(intent = %rule.intent, "rule matched");
                return Some(ResolvedIntent::new(rule.intent, params, IntentOrigin::Rule));
            }
        }
        None
    }
}

impl Default for RuleMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IntentSource for RuleMatcher {
    async fn interpret(&self, text: &str) -> Option<ResolvedIntent> {
        self.match_text(text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
