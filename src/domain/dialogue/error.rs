//! Error kinds carried by a dialogue act in place of a reply.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a dialogue act carries no regular reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueErrorKind {
    /// No utterance to process. A terminal no-op, not a failure.
    InputEmpty,
    /// A classification, tagging or generation service was unreachable or errored.
    OracleUnavailable,
    /// An oracle answered outside its contract.
    OracleMalformedOutput,
    /// The speech collaborator produced no usable audio.
    CaptureFailure,
    /// No completion oracle credential or endpoint is configured.
    ConfigurationMissing,
}

impl DialogueErrorKind {
    /// Returns true for kinds that represent an actual failure.
    pub fn is_failure(&self) -> bool {
        !matches!(self, DialogueErrorKind::InputEmpty)
    }
}

impl fmt::Display for DialogueErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DialogueErrorKind::InputEmpty => "INPUT_EMPTY",
            DialogueErrorKind::OracleUnavailable => "ORACLE_UNAVAILABLE",
            DialogueErrorKind::OracleMalformedOutput => "ORACLE_MALFORMED_OUTPUT",
            DialogueErrorKind::CaptureFailure => "CAPTURE_FAILURE",
            DialogueErrorKind::ConfigurationMissing => "CONFIGURATION_MISSING",
        };
        write!(f, "{}", s)
    }
}

/// Error marker plus a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueFault {
    pub kind: DialogueErrorKind,
    pub message: String,
}

impl DialogueFault {
    /// Creates a new fault.
    pub fn new(kind: DialogueErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for DialogueFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}
