//! Dialogue HTTP adapter.
//!
//! Exposes the NLU endpoint, the conversation window and the persona and
//! language catalogs.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ConversationView, DialogueErrorView, ErrorResponse, HealthResponse, LanguageView, NluRequest,
    NluResponse, PersonaView, TurnView,
};
pub use handlers::{DialogueApiError, DialogueAppState};
pub use routes::{build_app, dialogue_router, dialogue_routes};
