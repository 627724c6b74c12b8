//! Dialogue handlers - the understanding and orchestration pipeline.
//!
//! - `IntentClassifier` - zero-shot intent over a fixed candidate set
//! - `EntityExtractor` - token tagging plus slot vocabulary lookup
//! - `FallbackResolver` - canned smalltalk replies before generation
//! - `DialogueOrchestrator` - sequences the above per utterance

mod classify_intent;
mod extract_entities;
mod orchestrator;
mod resolve_smalltalk;

pub use classify_intent::{
    rank_candidates, IntentClassification, IntentClassifier, IntentScore,
    EMPTY_INPUT_PLACEHOLDER,
};
pub use extract_entities::{EntityExtractor, SKIPPED_ENTITY_GROUPS};
pub use orchestrator::{
    DialogueOrchestrator, OrchestratorSettings, ReplyMode, SharedConversation, VoiceResponse,
};
pub use resolve_smalltalk::{
    FallbackResolver, ReplySource, ResolverState, SmalltalkReply, SmalltalkRule,
    DEFAULT_SMALLTALK_MAX_TOKENS, SMALLTALK_RULES,
};
