//! StartSession command handler.

use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::dialogue::composer::{choose_form_message, form_not_found_message, welcome_message};
use crate::domain::dialogue::Session;
use crate::domain::form::FormIdentifier;
use crate::domain::foundation::{DomainError, SessionId, ValidationError};
use crate::ports::{
    DeadlineProvider, FormKind, SchemaError, SchemaResolver, SessionRepository, SessionStoreError,
};

/// Command to open a new chat session.
#[derive(Debug, Clone, Default)]
pub struct StartSessionCommand {
    pub form: Option<String>,
}

impl StartSessionCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_form(form: impl Into<String>) -> Self {
        Self {
            form: Some(form.into()),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum StartSessionError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Session store error: {0}")]
    Store(#[from] SessionStoreError),
}

impl From<StartSessionError> for DomainError {
    fn from(err: StartSessionError) -> Self {
        match err {
            StartSessionError::Validation(e) => e.into(),
            StartSessionError::Store(e) => e.into(),
        }
    }
}

/// Result of opening a session.
///
/// `session_id` is `None` when the requested form could not be found; no
/// session exists in that case.
#[derive(Debug, Clone)]
pub struct StartSessionResult {
    pub session_id: Option<SessionId>,
    pub message: String,
    pub form: Option<FormIdentifier>,
}

/// Handler for StartSession commands.
pub struct StartSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    schemas: Arc<dyn SchemaResolver>,
    deadlines: Arc<dyn DeadlineProvider>,
    default_form: Option<FormIdentifier>,
}

impl StartSessionHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        schemas: Arc<dyn SchemaResolver>,
        deadlines: Arc<dyn DeadlineProvider>,
    ) -> Self {
        Self {
            sessions,
            schemas,
            deadlines,
            default_form: None,
        }
    }

    pub fn with_default_form(mut self, form: Option<FormIdentifier>) -> Self {
        self.default_form = form;
        self
    }

    pub async fn handle(&self, cmd: StartSessionCommand) -> Result<StartSessionResult, StartSessionError> {
        let requested = match cmd.form.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(FormIdentifier::parse(raw)?),
            _ => None,
        };

        let Some(form) = requested.or_else(|| self.default_form.clone()) else {
            return self.start_without_form().await;
        };

        let schema = match self.schemas.resolve(&form).await {
            Ok(schema) => schema,
            Err(SchemaError::NotFound(raw)) => {
                warn!(form = %raw, "cannot start session: form not found");
                return Ok(StartSessionResult {
                    session_id: None,
                    message: form_not_found_message(&raw),
                    form: None,
                });
            }
        };

        let status = self.deadlines.status(&form).await.map(|s| s.to_string());
        let message = welcome_message(&schema, status.as_deref());

        let mut session = Session::new(SessionId::generate(), Some(form.clone()));
        session.push_agent_message(&message);
        self.sessions.set(&session).await?;

        info!(session_id = %session.id(), form = %form, "session started");

        Ok(StartSessionResult {
            session_id: Some(session.id().clone()),
            message,
            form: Some(form),
        })
    }

    async fn start_without_form(&self) -> Result<StartSessionResult, StartSessionError> {
        let templates: Vec<(String, String)> = self
            .schemas
            .available_forms()
            .await
            .into_iter()
            .filter(|f| f.kind == FormKind::Template)
            .map(|f| (f.id.to_string(), f.name))
            .collect();
        let message = choose_form_message(&templates);

        let mut session = Session::new(SessionId::generate(), None);
        session.push_agent_message(&message);
        self.sessions.set(&session).await?;

        info!(session_id = %session.id(), "session started without a form");

        Ok(StartSessionResult {
            session_id: Some(session.id().clone()),
            message,
            form: None,
        })
    }
}
