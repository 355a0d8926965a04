//! Request and response bodies for the chat endpoints.
//!
//! Field names are camelCase to match the browser client.

use serde::{Deserialize, Serialize};

use crate::application::{ProcessTurnResult, StartSessionResult};
use crate::domain::dialogue::{Message, MessageRole, Session};
use crate::domain::form::FieldValues;
use crate::domain::foundation::ValidationError;
use crate::ports::FormSummary;

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/chat/start
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StartChatRequest {
    pub form_type: Option<String>,
}

/// POST /api/chat
///
/// Everything is optional at the JSON level so that a missing session id or
/// message gets a structured 400 rather than an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub message: Option<String>,
    pub form_data: Option<FieldValues>,
    pub form_type: Option<String>,
    pub use_auto_fill: Option<bool>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartChatResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_type: Option<String>,
}

impl From<StartSessionResult> for StartChatResponse {
    fn from(result: StartSessionResult) -> Self {
        Self {
            session_id: result.session_id.map(String::from),
            message: result.message,
            form_type: result.form.map(|f| f.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub message: String,
    pub form_data: FieldValues,
    pub is_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_type: Option<String>,
    /// RFC 3339
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_warning: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline_passed: Option<bool>,
}

impl From<ProcessTurnResult> for ChatResponse {
    fn from(result: ProcessTurnResult) -> Self {
        Self {
            message: result.message,
            form_data: result.fields,
            is_complete: result.is_complete,
            form_type: result.form.map(|f| f.to_string()),
            deadline_warning: result.deadline.map(|_| result.deadline_warning),
            deadline_passed: result.deadline.map(|_| result.deadline_passed),
            deadline: result.deadline.map(|d| d.as_datetime().to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRoleDto {
    User,
    Agent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub role: MessageRoleDto,
    pub content: String,
    pub timestamp: String,
}

impl From<&Message> for MessageView {
    fn from(message: &Message) -> Self {
        Self {
            role: match message.role {
                MessageRole::User => MessageRoleDto::User,
                MessageRole::Agent => MessageRoleDto::Agent,
            },
            content: message.content.clone(),
            timestamp: message.timestamp.as_datetime().to_rfc3339(),
        }
    }
}

/// GET /api/chat/sessions/:session_id
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_type: Option<String>,
    pub messages: Vec<MessageView>,
    pub form_data: FieldValues,
    pub is_complete: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id().to_string(),
            form_type: session.form().map(|f| f.to_string()),
            messages: session.history().iter().map(MessageView::from).collect(),
            form_data: session.fields().clone(),
            is_complete: session.is_complete(),
            created_at: session.created_at().as_datetime().to_rfc3339(),
            updated_at: session.updated_at().as_datetime().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FormsResponse {
    pub forms: Vec<FormSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn validation(err: &ValidationError) -> Self {
        Self {
            code: "VALIDATION_FAILED".to_string(),
            message: err.to_string(),
            details: Some(serde_json::json!({ "field": err.field() })),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: format!("{} not found: {}", resource_type, id),
            details: None,
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            code: "SERVICE_UNAVAILABLE".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}
