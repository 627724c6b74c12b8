//! Completion provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound for `max_retries`.
pub const MAX_RETRIES_LIMIT: u32 = 10;

/// Configuration for the persona-conditioned completion oracle.
///
/// Missing keys are not a validation failure. Requests that need a
/// completion provider report `configuration_missing` instead.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Primary completion provider
    #[serde(default = "default_provider")]
    pub provider: AiProvider,

    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// Fallback completion provider
    pub fallback_provider: Option<AiProvider>,

    /// Model override for the primary provider
    pub model: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum retries on failure
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Output cap for persona replies
    #[serde(default = "default_max_reply_tokens")]
    pub max_reply_tokens: u32,
}

/// Completion provider type
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    OpenAI,
    #[default]
    Gemini,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if OpenAI is configured
    pub fn has_openai(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Check if Gemini is configured
    pub fn has_gemini(&self) -> bool {
        self.gemini_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// API key for the given provider, if set.
    pub fn api_key(&self, provider: AiProvider) -> Option<&str> {
        let key = match provider {
            AiProvider::OpenAI => self.openai_api_key.as_deref(),
            AiProvider::Gemini => self.gemini_api_key.as_deref(),
        };
        key.filter(|k| !k.is_empty())
    }

    /// Whether the primary provider can be constructed.
    pub fn has_credentials(&self) -> bool {
        self.api_key(self.provider).is_some()
    }

    /// Validate completion configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_reply_tokens == 0 {
            return Err(ValidationError::InvalidTokenLimit);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_retries > MAX_RETRIES_LIMIT {
            return Err(ValidationError::TooManyRetries {
                max: MAX_RETRIES_LIMIT,
                actual: self.max_retries,
            });
        }
        if self.fallback_provider == Some(self.provider) {
            return Err(ValidationError::FallbackSameAsPrimary);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            openai_api_key: None,
            gemini_api_key: None,
            fallback_provider: None,
            model: None,
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
            max_reply_tokens: default_max_reply_tokens(),
        }
    }
}

fn default_provider() -> AiProvider {
    AiProvider::Gemini
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    3
}

fn default_max_reply_tokens() -> u32 {
    256
}
