//! HTTP DTOs for the dialogue endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::conversation::{Turn, TurnRole};
use crate::domain::dialogue::{DialogueAct, DialogueErrorKind};
use crate::domain::persona::{Language, PersonaDescriptor};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/nlu`. A missing `input` is treated as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NluRequest {
    #[serde(default)]
    pub input: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Structured result of one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NluResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    pub entities: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<DialogueErrorView>,
}

/// Error marker carried in place of a reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogueErrorView {
    pub kind: DialogueErrorKind,
    pub message: String,
}

impl From<DialogueAct> for NluResponse {
    fn from(act: DialogueAct) -> Self {
        Self {
            intent: act.intent.map(|i| i.as_str().to_string()),
            entities: act
                .entities
                .into_iter()
                .map(|(slot, value)| (slot.as_str().to_string(), value))
                .collect(),
            reply: act.reply,
            error: act.error.map(|fault| DialogueErrorView {
                kind: fault.kind,
                message: fault.message,
            }),
        }
    }
}

/// View of one conversation turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnView {
    pub role: TurnRole,
    pub content: String,
    pub sequence: u64,
    pub recorded_at: String,
    /// Whether synthesized audio is attached. The bytes themselves are not exposed.
    pub has_audio: bool,
}

impl From<&Turn> for TurnView {
    fn from(turn: &Turn) -> Self {
        Self {
            role: turn.role(),
            content: turn.content().to_string(),
            sequence: turn.sequence(),
            recorded_at: turn.recorded_at().to_rfc3339(),
            has_audio: turn.audio().is_some(),
        }
    }
}

/// View of the current conversation window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationView {
    pub persona: String,
    pub context_exchanges: usize,
    pub turns: Vec<TurnView>,
}

/// A selectable persona.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaView {
    pub name: String,
    pub directive: String,
    pub is_default: bool,
}

impl PersonaView {
    pub fn new(persona: &PersonaDescriptor, default_name: &str) -> Self {
        Self {
            name: persona.name.clone(),
            directive: persona.directive.clone(),
            is_default: persona.name == default_name,
        }
    }
}

/// A recognized speech language.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageView {
    pub code: String,
    pub name: String,
}

impl From<&Language> for LanguageView {
    fn from(language: &Language) -> Self {
        Self {
            code: language.code.clone(),
            name: language.name.clone(),
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }
}
