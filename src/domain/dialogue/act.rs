//! The structured result produced for every utterance.

use serde::{Deserialize, Serialize};

use super::error::{DialogueErrorKind, DialogueFault};
use super::intent::Intent;
use super::slots::Entities;

/// Intent, slot values and an optional reply for one utterance.
///
/// Produced fresh per utterance and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DialogueAct {
    /// Classified intent; absent only when no classification took place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    /// Extracted slot values.
    #[serde(default)]
    pub entities: Entities,
    /// Reply text, rule-based or generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<String>,
    /// Error marker carried in place of a reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<DialogueFault>,
}

impl DialogueAct {
    /// Creates an act for a classified utterance.
    pub fn understood(intent: Intent, entities: Entities) -> Self {
        Self {
            intent: Some(intent),
            entities,
            reply: None,
            error: None,
        }
    }

    /// Intent-less result for an empty or whitespace-only utterance.
    pub fn empty_input() -> Self {
        Self::failed(DialogueErrorKind::InputEmpty, "No utterance to process")
    }

    /// Intent-less error result.
    pub fn failed(kind: DialogueErrorKind, message: impl Into<String>) -> Self {
        Self {
            error: Some(DialogueFault::new(kind, message)),
            ..Self::default()
        }
    }

    /// Sets the reply.
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.reply = Some(reply.into());
        self
    }

    /// Replaces any reply with an error marker, keeping intent and entities.
    pub fn with_fault(mut self, fault: DialogueFault) -> Self {
        self.reply = None;
        self.error = Some(fault);
        self
    }

    /// Returns the error kind, if any.
    pub fn error_kind(&self) -> Option<DialogueErrorKind> {
        self.error.as_ref().map(|f| f.kind)
    }
}
