//! Hosted inference oracle configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Hosted zero-shot, tagging and generation models.
#[derive(Debug, Clone, Deserialize)]
pub struct NluConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Optional access token
    pub api_token: Option<String>,

    #[serde(default = "default_classifier_model")]
    pub classifier_model: String,

    #[serde(default = "default_tagger_model")]
    pub tagger_model: String,

    #[serde(default = "default_generator_model")]
    pub generator_model: String,

    /// Per-call deadline for every oracle
    #[serde(default = "default_oracle_timeout")]
    pub oracle_timeout_secs: u64,
}

impl NluConfig {
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }

    pub fn api_token(&self) -> Option<&str> {
        self.api_token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.oracle_timeout_secs == 0 || self.oracle_timeout_secs > 300 {
            return Err(ValidationError::InvalidOracleTimeout);
        }
        Ok(())
    }
}

impl Default for NluConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: None,
            classifier_model: default_classifier_model(),
            tagger_model: default_tagger_model(),
            generator_model: default_generator_model(),
            oracle_timeout_secs: default_oracle_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

fn default_classifier_model() -> String {
    "facebook/bart-large-mnli".to_string()
}

fn default_tagger_model() -> String {
    "dslim/bert-base-NER".to_string()
}

fn default_generator_model() -> String {
    "gpt2".to_string()
}

fn default_oracle_timeout() -> u64 {
    20
}
