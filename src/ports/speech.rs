//! Speech Ports - speech capture and synthesis collaborators.
//!
//! Audio capture, recognition and synthesis happen outside the core. The core
//! only sees the recognized utterance (or a failure signal) and an opaque
//! audio payload.

use async_trait::async_trait;

use super::OracleError;
use crate::domain::conversation::AudioPayload;
use crate::domain::persona::VoiceSettings;

/// Outcome of one capture-and-recognize attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechCapture {
    /// Recognized text.
    Utterance(String),
    /// Nothing was said before the listen timeout.
    NoSpeech,
    /// Audio was captured but could not be understood.
    Unrecognized,
    /// The recognition service failed.
    ServiceError(String),
}

impl SpeechCapture {
    /// Human-readable description of a failure signal.
    pub fn failure_message(&self) -> Option<String> {
        match self {
            SpeechCapture::Utterance(_) => None,
            SpeechCapture::NoSpeech => Some("No speech detected. Please try again.".to_string()),
            SpeechCapture::Unrecognized => {
                Some("Could not understand audio. Please try again.".to_string())
            }
            SpeechCapture::ServiceError(msg) => Some(format!("Speech recognition error: {}", msg)),
        }
    }
}

/// Port for speech-to-text.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Listens once and returns the recognized utterance or a failure signal.
    async fn capture(&self) -> SpeechCapture;
}

/// Port for text-to-speech.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesizes `text` with the given voice settings.
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSettings,
    ) -> Result<AudioPayload, OracleError>;
}
