//! Turn entity for the conversation log.
//!
//! Turns are immutable records of one side of an exchange. The store assigns
//! each turn a monotonic sequence index when it is appended.

use crate::domain::foundation::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// The human speaking to the assistant.
    User,
    /// The assistant's reply.
    Assistant,
}

impl TurnRole {
    /// Label used when rendering the turn into a prompt.
    pub fn label(&self) -> &'static str {
        match self {
            TurnRole::User => "User",
            TurnRole::Assistant => "Assistant",
        }
    }
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Synthesized speech attached to an assistant turn.
///
/// Opaque to the core: the bytes are stored and handed back, never inspected.
#[derive(Clone, PartialEq, Eq)]
pub struct AudioPayload {
    bytes: Vec<u8>,
    mime_type: String,
}

impl AudioPayload {
    /// Wraps synthesized audio.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Raw audio bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// MIME type reported by the synthesizer.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Payload size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the payload holds no audio.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for AudioPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioPayload")
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// One side of an exchange.
///
/// # Invariants
///
/// - `content` never changes after construction
/// - `sequence` is assigned exactly once, by the conversation store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    role: TurnRole,
    content: String,
    sequence: u64,
    recorded_at: Timestamp,
    audio: Option<AudioPayload>,
}

impl Turn {
    /// Creates a turn with the given role and content.
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            sequence: 0,
            recorded_at: Timestamp::now(),
            audio: None,
        }
    }

    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(TurnRole::User, content)
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, content)
    }

    /// Attaches synthesized audio.
    pub fn with_audio(mut self, audio: AudioPayload) -> Self {
        self.audio = Some(audio);
        self
    }

    pub fn role(&self) -> TurnRole {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Position in the conversation, in insertion order.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn recorded_at(&self) -> &Timestamp {
        &self.recorded_at
    }

    pub fn audio(&self) -> Option<&AudioPayload> {
        self.audio.as_ref()
    }

    /// Renders the turn as `"<RoleLabel>: <content>"`.
    pub fn render(&self) -> String {
        format!("{}: {}", self.role.label(), self.content)
    }

    pub(super) fn assign_sequence(&mut self, sequence: u64) {
        self.sequence = sequence;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_uses_role_label() {
        assert_eq!(Turn::user("go to careers").render(), "User: go to careers");
        assert_eq!(
            Turn::assistant("Opening careers.").render(),
            "Assistant: Opening careers."
        );
    }

    #[test]
    fn with_audio_attaches_payload() {
        let turn = Turn::assistant("Hi").with_audio(AudioPayload::new(vec![1, 2, 3], "audio/mpeg"));
        let audio = turn.audio().unwrap();
        assert_eq!(audio.bytes(), &[1, 2, 3]);
        assert_eq!(audio.mime_type(), "audio/mpeg");
    }

    #[test]
    fn audio_debug_does_not_dump_bytes() {
        let audio = AudioPayload::new(vec![0; 2048], "audio/mpeg");
        let debug = format!("{:?}", audio);
        assert!(debug.contains("len: 2048"));
        assert!(debug.len() < 100);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TurnRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&TurnRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
