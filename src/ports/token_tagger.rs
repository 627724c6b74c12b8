//! Token Tagger Port - token classification (named-entity style tagging).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::OracleError;

/// Port for token tagging.
///
/// Returns recognized spans in token order, each with its surface form and
/// tag group.
#[async_trait]
pub trait TokenTagger: Send + Sync {
    /// Tags the text.
    async fn tag(&self, text: &str) -> Result<Vec<TaggedSpan>, OracleError>;
}

/// A recognized span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedSpan {
    /// Surface form as it appears in the text.
    pub word: String,
    /// Tag group, e.g. `ORG`, `LOC`, `MISC`, `PER`.
    pub entity_group: String,
    /// Oracle confidence.
    #[serde(default)]
    pub score: f32,
    /// Start offset in the text.
    #[serde(default)]
    pub start: Option<usize>,
    /// End offset in the text.
    #[serde(default)]
    pub end: Option<usize>,
}

impl TaggedSpan {
    /// Creates a span without offsets.
    pub fn new(word: impl Into<String>, entity_group: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            entity_group: entity_group.into(),
            score: 1.0,
            start: None,
            end: None,
        }
    }
}
