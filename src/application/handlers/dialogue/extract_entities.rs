//! Entity extraction: token tagging followed by slot vocabulary lookup.

use std::sync::Arc;

use crate::domain::dialogue::{Entities, SlotVocabulary};
use crate::ports::{OracleError, TaggedSpan, TokenTagger};

/// Generic named-entity groups that are never slot candidates.
pub const SKIPPED_ENTITY_GROUPS: [&str; 4] = ["ORG", "LOC", "MISC", "PER"];

/// Fills slots from the spans a token tagger recognizes.
pub struct EntityExtractor {
    tagger: Arc<dyn TokenTagger>,
    vocabulary: SlotVocabulary,
}

impl EntityExtractor {
    /// Creates an extractor with the given vocabulary.
    pub fn new(tagger: Arc<dyn TokenTagger>, vocabulary: SlotVocabulary) -> Self {
        Self { tagger, vocabulary }
    }

    /// Tags the utterance and maps recognized spans onto slots.
    ///
    /// Blank utterances yield an empty mapping without calling the tagger.
    pub async fn extract(&self, utterance: &str) -> Result<Entities, OracleError> {
        if utterance.trim().is_empty() {
            return Ok(Entities::new());
        }

        let spans = self.tagger.tag(utterance).await?;
        let entities = self.map_spans(&spans);

        tracing::debug!(spans = spans.len(), entities = ?entities, "Extracted entities");
        Ok(entities)
    }

    /// Maps spans onto slots. When several spans fill the same slot, the last one wins.
    pub fn map_spans(&self, spans: &[TaggedSpan]) -> Entities {
        let mut entities = Entities::new();
        for span in spans {
            if is_skipped_group(&span.entity_group) {
                continue;
            }
            if let Some((slot, value)) = self.vocabulary.lookup(&span.word) {
                entities.insert(slot, value.to_string());
            }
        }
        entities
    }
}

/// Accepts both aggregated groups (`ORG`) and BIO-prefixed tags (`B-ORG`).
fn is_skipped_group(group: &str) -> bool {
    let group = group
        .strip_prefix("B-")
        .or_else(|| group.strip_prefix("I-"))
        .unwrap_or(group);
    SKIPPED_ENTITY_GROUPS
        .iter()
        .any(|skipped| skipped.eq_ignore_ascii_case(group))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::nlu::MockTokenTagger;
    use crate::domain::dialogue::Slot;

    fn extractor() -> EntityExtractor {
        EntityExtractor::new(Arc::new(MockTokenTagger::new()), SlotVocabulary::default())
    }

    #[test]
    fn page_token_sets_page_slot_lowercased() {
        let entities = extractor().map_spans(&[TaggedSpan::new("Careers", "PAGE")]);
        assert_eq!(entities.get(&Slot::Page), Some(&"careers".to_string()));
        assert_eq!(entities.len(), 1);
    }

    #[test]
    fn category_token_sets_category_slot() {
        let entities = extractor().map_spans(&[TaggedSpan::new("Sales", "JOB")]);
        assert_eq!(entities.get(&Slot::Category), Some(&"sales".to_string()));
    }

    #[test]
    fn last_page_token_wins() {
        let entities = extractor().map_spans(&[
            TaggedSpan::new("home", "PAGE"),
            TaggedSpan::new("contact", "PAGE"),
            TaggedSpan::new("about", "PAGE"),
        ]);
        assert_eq!(entities.get(&Slot::Page), Some(&"about".to_string()));
    }

    #[test]
    fn generic_entity_groups_are_skipped() {
        let entities = extractor().map_spans(&[
            TaggedSpan::new("careers", "ORG"),
            TaggedSpan::new("home", "LOC"),
            TaggedSpan::new("it", "MISC"),
            TaggedSpan::new("sales", "PER"),
            TaggedSpan::new("about", "B-ORG"),
        ]);
        assert!(entities.is_empty());
    }

    #[test]
    fn unknown_tokens_produce_empty_mapping() {
        let entities = extractor().map_spans(&[TaggedSpan::new("weather", "NOUN")]);
        assert!(entities.is_empty());
    }

    #[test]
    fn page_and_category_can_both_be_filled() {
        let entities = extractor().map_spans(&[
            TaggedSpan::new("IT", "JOB"),
            TaggedSpan::new("careers", "PAGE"),
        ]);
        assert_eq!(entities.get(&Slot::Page), Some(&"careers".to_string()));
        assert_eq!(entities.get(&Slot::Category), Some(&"it".to_string()));
    }

    #[tokio::test]
    async fn extract_skips_tagger_for_blank_input() {
        let tagger = Arc::new(MockTokenTagger::new());
        let extractor = EntityExtractor::new(tagger.clone(), SlotVocabulary::default());

        let entities = extractor.extract("   ").await.unwrap();

        assert!(entities.is_empty());
        assert_eq!(tagger.call_count(), 0);
    }

    #[tokio::test]
    async fn extract_maps_tagger_output() {
        let tagger = Arc::new(
            MockTokenTagger::new().with_spans(vec![TaggedSpan::new("careers", "PAGE")]),
        );
        let extractor = EntityExtractor::new(tagger.clone(), SlotVocabulary::default());

        let entities = extractor.extract("go to careers page").await.unwrap();

        assert_eq!(entities.get(&Slot::Page), Some(&"careers".to_string()));
        assert_eq!(tagger.call_count(), 1);
    }

    #[tokio::test]
    async fn extract_propagates_oracle_errors() {
        let tagger =
            Arc::new(MockTokenTagger::new().with_error(OracleError::AuthenticationFailed));
        let extractor = EntityExtractor::new(tagger, SlotVocabulary::default());

        assert_eq!(
            extractor.extract("hello").await.unwrap_err(),
            OracleError::AuthenticationFailed
        );
    }
}
