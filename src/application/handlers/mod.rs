//! Application handlers.
//!
//! Handlers that sequence domain rules and oracle ports.

pub mod dialogue;

pub use dialogue::{
    DialogueOrchestrator, EntityExtractor, FallbackResolver, IntentClassifier,
    OrchestratorSettings, ReplyMode, SharedConversation, VoiceResponse,
};
