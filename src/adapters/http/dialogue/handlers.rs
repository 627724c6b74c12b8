//! HTTP handlers for the dialogue endpoints.
//!
//! These handlers connect Axum routes to the dialogue orchestrator. Recognized
//! but unhandled intents and oracle failures still answer 200 with a
//! structured body; only transport problems produce other statuses.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::dialogue::DialogueOrchestrator;
use crate::domain::persona::{LanguageCatalog, PersonaCatalog};

use super::dto::{
    ConversationView, ErrorResponse, HealthResponse, LanguageView, NluRequest, NluResponse,
    PersonaView, TurnView,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for dialogue handlers.
#[derive(Clone)]
pub struct DialogueAppState {
    pub orchestrator: Arc<DialogueOrchestrator>,
}

impl DialogueAppState {
    pub fn new(orchestrator: Arc<DialogueOrchestrator>) -> Self {
        Self { orchestrator }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// POST /api/nlu
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/nlu - Classify an utterance and extract slots.
///
/// # Errors
/// - 400 Bad Request: body is not valid JSON
pub async fn understand(
    State(state): State<DialogueAppState>,
    body: Result<Json<NluRequest>, JsonRejection>,
) -> Result<impl IntoResponse, DialogueApiError> {
    let Json(request) = body.map_err(|e| DialogueApiError::BadRequest(e.body_text()))?;

    let act = state.orchestrator.handle(&request.input).await;
    Ok((StatusCode::OK, Json(NluResponse::from(act))))
}

// ════════════════════════════════════════════════════════════════════════════════
// /api/conversation
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/conversation - Current conversation window.
pub async fn get_conversation(State(state): State<DialogueAppState>) -> impl IntoResponse {
    let orchestrator = &state.orchestrator;
    let window = orchestrator.conversation_window().await;

    Json(ConversationView {
        persona: orchestrator.persona().name.clone(),
        context_exchanges: orchestrator.settings().context_exchanges,
        turns: window.iter().map(TurnView::from).collect(),
    })
}

/// DELETE /api/conversation - Clear the conversation.
pub async fn clear_conversation(State(state): State<DialogueAppState>) -> StatusCode {
    state.orchestrator.clear_conversation().await;
    StatusCode::NO_CONTENT
}

// ════════════════════════════════════════════════════════════════════════════════
// Configuration surface
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/personas - Recognized personas.
pub async fn list_personas() -> impl IntoResponse {
    let catalog = PersonaCatalog::builtin();
    let default_name = catalog.default_persona().name.as_str();
    let personas: Vec<PersonaView> = catalog
        .all()
        .iter()
        .map(|p| PersonaView::new(p, default_name))
        .collect();
    Json(personas)
}

/// GET /api/languages - Recognized speech languages.
pub async fn list_languages() -> impl IntoResponse {
    let languages: Vec<LanguageView> = LanguageCatalog::builtin()
        .all()
        .iter()
        .map(LanguageView::from)
        .collect();
    Json(languages)
}

/// GET /health - Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type for transport-level failures.
#[derive(Debug)]
pub enum DialogueApiError {
    BadRequest(String),
}

impl IntoResponse for DialogueApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            DialogueApiError::BadRequest(msg) => {
                tracing::debug!(reason = %msg, "Rejected malformed request body");
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
        };

        (status, Json(error)).into_response()
    }
}
