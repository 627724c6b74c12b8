//! Dialogue behavior configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::handlers::dialogue::ReplyMode;
use crate::domain::persona::{LanguageCatalog, VoiceSettings, DEFAULT_LANGUAGE, DEFAULT_PERSONA};

/// Persona, voice and reply behavior.
#[derive(Debug, Clone, Deserialize)]
pub struct DialogueConfig {
    #[serde(default)]
    pub reply_mode: ReplyMode,

    /// Persona name; unknown names fall back to the default persona.
    #[serde(default = "default_persona")]
    pub persona: String,

    /// Speech language code or display name
    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub slow_speech: bool,

    /// Exchanges of history included in persona prompts
    #[serde(default = "default_context_exchanges")]
    pub context_exchanges: usize,

    #[serde(default = "default_smalltalk_max_tokens")]
    pub smalltalk_max_tokens: u32,

    /// Deadline for a whole turn in seconds; below the server request timeout
    #[serde(default = "default_turn_timeout")]
    pub turn_timeout_secs: u64,
}

impl DialogueConfig {
    pub fn voice(&self) -> VoiceSettings {
        VoiceSettings::new(&self.language, self.slow_speech)
    }

    pub fn turn_timeout(&self) -> Duration {
        Duration::from_secs(self.turn_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.turn_timeout_secs == 0 || self.turn_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(1..=10).contains(&self.context_exchanges) {
            return Err(ValidationError::InvalidContextExchanges(
                self.context_exchanges,
            ));
        }
        if self.smalltalk_max_tokens == 0 {
            return Err(ValidationError::InvalidTokenLimit);
        }
        if !LanguageCatalog::builtin().is_recognized(&self.language) {
            return Err(ValidationError::UnknownLanguage(self.language.clone()));
        }
        Ok(())
    }
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            reply_mode: ReplyMode::default(),
            persona: default_persona(),
            language: default_language(),
            slow_speech: false,
            context_exchanges: default_context_exchanges(),
            smalltalk_max_tokens: default_smalltalk_max_tokens(),
            turn_timeout_secs: default_turn_timeout(),
        }
    }
}

fn default_persona() -> String {
    DEFAULT_PERSONA.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_context_exchanges() -> usize {
    5
}

fn default_smalltalk_max_tokens() -> u32 {
    50
}

fn default_turn_timeout() -> u64 {
    110
}
