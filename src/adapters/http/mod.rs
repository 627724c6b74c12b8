//! HTTP adapters - REST API implementations.

pub mod dialogue;

// Re-export key types for convenience
pub use dialogue::{build_app, dialogue_router, DialogueAppState};
