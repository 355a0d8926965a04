//! Axum routes for chat endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{chat, get_session, health, list_forms, start_chat, ChatAppState};

/// Routes under /api.
///
/// - POST /api/chat/start - Open a session
/// - POST /api/chat - Process one message
/// - GET /api/chat/sessions/:session_id - Transcript view
/// - GET /api/forms - Available forms
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new()
        .route("/chat/start", post(start_chat))
        .route("/chat", post(chat))
        .route("/chat/sessions/:session_id", get(get_session))
        .route("/forms", get(list_forms))
}

/// Combined router with the chat routes under /api plus /health.
pub fn chat_router() -> Router<ChatAppState> {
    Router::new()
        .nest("/api", chat_routes())
        .route("/health", get(health))
}
