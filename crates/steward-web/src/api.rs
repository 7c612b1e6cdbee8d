//! REST API route handlers.
//!
//! One-shot request/response only: a chat message is interpreted, resolved,
//! logged, and answered in a single round trip.  The pipeline never fails a
//! request; a reply body with `success: false` still carries a message the
//! caller can display.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use steward_intent::{Intent, ParamKey};
use steward_ops::{ActionDescriptor, LogEntry, LogStatus};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /api/chat
// ---------------------------------------------------------------------------

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatBody {
    /// The natural-language request.
    #[serde(default)]
    pub message: String,
}

/// Interpret one message, resolve it, and record any emitted SQL.
///
/// The reply mirrors the resolution: `success`, `message`, `intent`, plus
/// `sql` and `explanation` when present.  `success` is false only when the
/// request could not be mapped to an operation (unknown intent or a
/// clarification); those replies carry no SQL and are not logged.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ChatBody>,
) -> (StatusCode, Json<Value>) {
    let message = body.message.trim();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "No message provided" })),
        );
    }

    let resolved = state.interpreter.interpret(message).await;
    let result = state.resolver.resolve(resolved.intent, &resolved.params);

    let success = !matches!(
        result.action,
        ActionDescriptor::Unknown | ActionDescriptor::Clarification
    );
    let status = if success {
        LogStatus::Success
    } else {
        LogStatus::Failed
    };
    state.log.record(resolved.intent, &result, status);

    let mut reply = json!({
        "success": success,
        "message": result.message,
        "intent": resolved.intent,
    });
    if let Some(sql) = &result.sql {
        reply["sql"] = json!(sql);
    }
    if let Some(explanation) = &resolved.explanation {
        reply["explanation"] = json!(explanation);
    }

    (StatusCode::OK, Json(reply))
}

// ---------------------------------------------------------------------------
// GET /api/actions
// ---------------------------------------------------------------------------

/// Return the session's statement log, oldest first.
pub async fn actions(State(state): State<Arc<AppState>>) -> Json<Vec<LogEntry>> {
    Json(state.log.snapshot())
}

// ---------------------------------------------------------------------------
// GET /api/rules
// ---------------------------------------------------------------------------

/// Serializable summary of one recognition rule.
#[derive(Debug, Serialize)]
pub struct RuleInfo {
    /// The intent the rule produces.
    pub intent: Intent,
    /// The rule's pattern source.
    pub pattern: String,
    /// The parameter slots the intent consumes, in declared order.
    pub slots: Vec<ParamKey>,
}

/// List the loaded recognition rules in evaluation order.
pub async fn rules(State(state): State<Arc<AppState>>) -> Json<Vec<RuleInfo>> {
    let infos: Vec<RuleInfo> = state
        .interpreter
        .matcher()
        .rules()
        .iter()
        .map(|rule| RuleInfo {
            intent: rule.intent,
            pattern: rule.pattern.clone(),
            slots: rule.slots().to_vec(),
        })
        .collect();

    Json(infos)
}

// ---------------------------------------------------------------------------
// GET /api/health
// ---------------------------------------------------------------------------

/// Liveness probe.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": state.service_name,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
