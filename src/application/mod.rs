//! Application layer - handlers that orchestrate domain operations.
//!
//! This layer coordinates the domain with the oracle ports. It owns no I/O of
//! its own; every external call goes through a port.

pub mod handlers;

pub use handlers::{
    DialogueOrchestrator, EntityExtractor, FallbackResolver, IntentClassifier,
    OrchestratorSettings, ReplyMode, SharedConversation, VoiceResponse,
};
