//! Two-stage intent interpretation.
//!
//! The [`Interpreter`] chains the recognition tiers: the ordered rule set
//! first, then an optional fallback analyzer behind the [`IntentSource`]
//! trait.  Interpretation is total: whatever the tiers do, the caller gets
//! a [`ResolvedIntent`] back, degrading to `help` when nothing else fits.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::rules::RuleMatcher;
use crate::types::{IntentOrigin, ResolvedIntent};

// ---------------------------------------------------------------------------
// IntentSource
// ---------------------------------------------------------------------------

/// A tier of the recognition pipeline.
///
/// `None` means "this tier has nothing to say about the text" and hands the
/// decision to the next tier.  Implementations must not error outward:
/// internal failures are either absorbed into a degraded resolution or
/// reported as `None`.
#[async_trait]
pub trait IntentSource: Send + Sync {
    /// Try to resolve `text` into an intent.
    async fn interpret(&self, text: &str) -> Option<ResolvedIntent>;
}

// ---------------------------------------------------------------------------
// Interpreter
// ---------------------------------------------------------------------------

/// The recognition pipeline: rules first, analyzer second, help last.
#[derive(Clone)]
pub struct Interpreter {
    matcher: RuleMatcher,
    analyzer: Option<Arc<dyn IntentSource>>,
}

impl Interpreter {
    /// Create an interpreter with no fallback analyzer.
    ///
    /// Without an analyzer, any text the rules cannot place resolves to
    /// `help`.
    pub fn new(matcher: RuleMatcher) -> Self {
        Self {
            matcher,
            analyzer: None,
        }
    }

    /// Attach a fallback analyzer consulted when no rule matches.
    #[must_use]
    pub fn with_analyzer(mut self, analyzer: Arc<dyn IntentSource>) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// The rule matcher backing the first tier.
    pub fn matcher(&self) -> &RuleMatcher {
        &self.matcher
    }

    /// True when a fallback analyzer is attached.
    pub fn has_analyzer(&self) -> bool {
        self.analyzer.is_some()
    }

    /// Resolve `text` into an intent.
    ///
    /// Empty (or whitespace-only) input resolves to `help` without
    /// consulting any tier.  Otherwise the rules run first; on a miss the
    /// analyzer is consulted, and if it is absent or declines, the result
    /// degrades to `help`.
    pub async fn interpret(&self, text: &str) -> ResolvedIntent {
        let text = text.trim();
        if text.is_empty() {
            debug!("empty input resolves to help");
            return ResolvedIntent::help(IntentOrigin::Rule);
        }

        if let Some(resolved) = self.matcher.match_text(text) {
            info!(intent = %resolved.intent, "rule matched input");
            return resolved;
        }

        if let Some(analyzer) = &self.analyzer {
            debug!("no rule matched, escalating to analyzer");
            if let Some(resolved) = analyzer.interpret(text).await {
                info!(intent = %resolved.intent, "analyzer resolved input");
                return resolved;
            }
        } else {
            debug!("no rule matched and no analyzer attached");
        }

        ResolvedIntent::help(IntentOrigin::Analyzer)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
