//! Conversation domain module.
//!
//! Holds the turn log for a single conversation and renders it into
//! persona-conditioned completion prompts.

mod context;
mod prompt;
mod turn;

pub use context::ConversationContext;
pub use prompt::{PersonaPromptBuilder, HISTORY_HEADER};
pub use turn::{AudioPayload, Turn, TurnRole};
