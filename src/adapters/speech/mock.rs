//! Mock speech collaborators for testing and text-only deployments.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::conversation::AudioPayload;
use crate::domain::persona::VoiceSettings;
use crate::ports::{OracleError, SpeechCapture, SpeechToText, TextToSpeech};

/// Mock speech-to-text that replays queued capture outcomes.
///
/// Answers `NoSpeech` once the queue is exhausted.
#[derive(Debug, Clone, Default)]
pub struct MockSpeechToText {
    captures: Arc<Mutex<VecDeque<SpeechCapture>>>,
}

impl MockSpeechToText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a recognized utterance.
    pub fn with_utterance(self, text: impl Into<String>) -> Self {
        self.with_capture(SpeechCapture::Utterance(text.into()))
    }

    /// Queues an arbitrary capture outcome.
    pub fn with_capture(self, capture: SpeechCapture) -> Self {
        self.captures.lock().unwrap().push_back(capture);
        self
    }
}

#[async_trait]
impl SpeechToText for MockSpeechToText {
    async fn capture(&self) -> SpeechCapture {
        self.captures
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(SpeechCapture::NoSpeech)
    }
}

/// Mock text-to-speech that returns the UTF-8 bytes of the text as "audio".
#[derive(Debug, Clone, Default)]
pub struct MockTextToSpeech {
    error: Arc<Mutex<Option<OracleError>>>,
    calls: Arc<Mutex<Vec<(String, VoiceSettings)>>>,
}

impl MockTextToSpeech {
    pub const MIME_TYPE: &'static str = "audio/mpeg";

    pub fn new() -> Self {
        Self::default()
    }

    /// Fails every call with this error.
    pub fn with_error(self, error: OracleError) -> Self {
        *self.error.lock().unwrap() = Some(error);
        self
    }

    /// Text and voice of every synthesis request, in call order.
    pub fn get_calls(&self) -> Vec<(String, VoiceSettings)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextToSpeech for MockTextToSpeech {
    async fn synthesize(
        &self,
        text: &str,
        voice: &VoiceSettings,
    ) -> Result<AudioPayload, OracleError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), voice.clone()));

        if let Some(err) = self.error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(AudioPayload::new(text.as_bytes().to_vec(), Self::MIME_TYPE))
    }
}
