//! Axum routes for the dialogue endpoints.

use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use http::{header, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{
    clear_conversation, get_conversation, health, list_languages, list_personas, understand,
    DialogueAppState,
};

/// Creates routes for dialogue endpoints.
///
/// - POST /nlu - Classify an utterance and extract slots
/// - GET /conversation - Current conversation window
/// - DELETE /conversation - Clear the conversation
/// - GET /personas - Recognized personas
/// - GET /languages - Recognized speech languages
pub fn dialogue_routes() -> Router<DialogueAppState> {
    Router::new()
        .route("/nlu", post(understand))
        .route("/conversation", get(get_conversation).delete(clear_conversation))
        .route("/personas", get(list_personas))
        .route("/languages", get(list_languages))
}

/// Combined router with dialogue routes under /api plus /health.
pub fn dialogue_router() -> Router<DialogueAppState> {
    Router::new()
        .nest("/api", dialogue_routes())
        .route("/health", get(health))
}

/// Complete application: routes, state, tracing, timeout and CORS.
///
/// An empty origin list allows any origin.
pub fn build_app(state: DialogueAppState, cors_origins: &[String], request_timeout: Duration) -> Router {
    dialogue_router()
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(cors_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    if cors_origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialogue_routes_creates_valid_router() {
        let _routes = dialogue_routes();
    }

    #[test]
    fn dialogue_router_creates_combined_router() {
        let _router = dialogue_router();
    }

    #[test]
    fn cors_layer_accepts_explicit_origins() {
        let _layer = cors_layer(&["http://localhost:8501".to_string(), "not a header\n".to_string()]);
    }
}
