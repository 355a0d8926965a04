//! HTTP handlers for chat endpoints.
//!
//! These handlers connect Axum routes to the application handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{
    ProcessTurnCommand, ProcessTurnError, ProcessTurnHandler, StartSessionCommand,
    StartSessionError, StartSessionHandler,
};
use crate::domain::foundation::{SessionId, ValidationError};
use crate::ports::{SchemaResolver, SessionRepository, SessionStoreError};

use super::dto::{
    ChatRequest, ChatResponse, ErrorResponse, FormsResponse, HealthResponse, SessionView,
    StartChatRequest, StartChatResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for chat handlers.
///
/// The turn handler owns the per-session lock table, so it is shared rather
/// than rebuilt per request.
#[derive(Clone)]
pub struct ChatAppState {
    pub start_session: Arc<StartSessionHandler>,
    pub process_turn: Arc<ProcessTurnHandler>,
    pub sessions: Arc<dyn SessionRepository>,
    pub schemas: Arc<dyn SchemaResolver>,
}

impl ChatAppState {
    pub fn new(
        start_session: StartSessionHandler,
        process_turn: ProcessTurnHandler,
        sessions: Arc<dyn SessionRepository>,
        schemas: Arc<dyn SchemaResolver>,
    ) -> Self {
        Self {
            start_session: Arc::new(start_session),
            process_turn: Arc::new(process_turn),
            sessions,
            schemas,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// POST /api/chat/start
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/chat/start - Open a session, optionally for a named form.
///
/// An unknown form yields 200 with an apology and no `sessionId`.
pub async fn start_chat(
    State(state): State<ChatAppState>,
    body: Option<Json<StartChatRequest>>,
) -> Result<impl IntoResponse, ChatApiError> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let command = StartSessionCommand { form: request.form_type };

    let result = state.start_session.handle(command).await?;
    Ok((StatusCode::OK, Json(StartChatResponse::from(result))))
}

// ════════════════════════════════════════════════════════════════════════════════
// POST /api/chat
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/chat - Process one user message.
///
/// # Errors
/// - 400 Bad Request: missing `sessionId` or `message`
pub async fn chat(
    State(state): State<ChatAppState>,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse, ChatApiError> {
    let session_id = request
        .session_id
        .ok_or_else(|| ValidationError::empty_field("sessionId"))?;
    let message = request
        .message
        .ok_or_else(|| ValidationError::empty_field("message"))?;

    let mut command = ProcessTurnCommand::new(session_id, message)
        .with_client_fields(request.form_data.unwrap_or_default())
        .with_auto_fill(request.use_auto_fill.unwrap_or(false));
    command.form = request.form_type;

    let result = state.process_turn.handle(command).await?;
    Ok((StatusCode::OK, Json(ChatResponse::from(result))))
}

// ════════════════════════════════════════════════════════════════════════════════
// GET /api/chat/sessions/:session_id
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/chat/sessions/:session_id - Transcript and collected values.
///
/// # Errors
/// - 404 Not Found: unknown or expired session
pub async fn get_session(
    State(state): State<ChatAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ChatApiError> {
    let id = SessionId::new(session_id.as_str())?;
    let session = state
        .sessions
        .get(&id)
        .await?
        .ok_or_else(|| ChatApiError::NotFound("Session".to_string(), id.to_string()))?;

    Ok((StatusCode::OK, Json(SessionView::from(&session))))
}

// ════════════════════════════════════════════════════════════════════════════════
// GET /api/forms, GET /health
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/forms - Built-in forms followed by active templates.
pub async fn list_forms(State(state): State<ChatAppState>) -> impl IntoResponse {
    let forms = state.schemas.available_forms().await;
    (StatusCode::OK, Json(FormsResponse { forms }))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(HealthResponse::ok()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum ChatApiError {
    Validation(ValidationError),
    NotFound(String, String),
    Unavailable(String),
    Internal(String),
}

impl From<ValidationError> for ChatApiError {
    fn from(err: ValidationError) -> Self {
        ChatApiError::Validation(err)
    }
}

impl From<SessionStoreError> for ChatApiError {
    fn from(err: SessionStoreError) -> Self {
        match err {
            SessionStoreError::Backend(msg) => ChatApiError::Unavailable(msg),
            SessionStoreError::Serialization(msg) => ChatApiError::Internal(msg),
        }
    }
}

impl From<ProcessTurnError> for ChatApiError {
    fn from(err: ProcessTurnError) -> Self {
        match err {
            ProcessTurnError::Validation(e) => e.into(),
            ProcessTurnError::Store(e) => e.into(),
        }
    }
}

impl From<StartSessionError> for ChatApiError {
    fn from(err: StartSessionError) -> Self {
        match err {
            StartSessionError::Validation(e) => e.into(),
            StartSessionError::Store(e) => e.into(),
        }
    }
}

impl IntoResponse for ChatApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ChatApiError::Validation(err) => (StatusCode::BAD_REQUEST, ErrorResponse::validation(&err)),
            ChatApiError::NotFound(resource, id) => {
                (StatusCode::NOT_FOUND, ErrorResponse::not_found(&resource, &id))
            }
            ChatApiError::Unavailable(msg) => {
                tracing::error!("Session store unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::unavailable("Session storage is temporarily unavailable"),
                )
            }
            ChatApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal("An internal error occurred"))
            }
        };

        (status, Json(error)).into_response()
    }
}
