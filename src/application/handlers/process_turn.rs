//! ProcessTurn command handler.
//!
//! Runs one conversational turn: resolve the form, seed the working values
//! (stored fields, client fields, optional auto-fill), ask the text generator
//! for an advisory analysis, then plan, act and reflect before committing.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::TurnLocks;
use crate::domain::dialogue::composer::{choose_form_message, form_not_found_message, welcome_message};
use crate::domain::dialogue::pipeline::{self, AgentPhase, Reasoning};
use crate::domain::dialogue::prompt::{build_reason_prompt, REASON_SYSTEM_PROMPT};
use crate::domain::dialogue::Session;
use crate::domain::form::{FieldValues, FormIdentifier, FormSchema};
use crate::domain::foundation::{DomainError, SessionId, Timestamp, ValidationError};
use crate::ports::{
    AIProvider, AutoFillProvider, CompletionRequest, DeadlineProvider, FormKind, MessageRole,
    RequestMetadata, SchemaError, SchemaResolver, SessionRepository, SessionStoreError,
};

/// Command to process one user utterance.
#[derive(Debug, Clone, Default)]
pub struct ProcessTurnCommand {
    pub session_id: String,
    pub message: String,
    /// Values the client already holds; they only fill blanks.
    pub client_fields: FieldValues,
    pub form: Option<String>,
    /// Explicit consent to look the student up in the directory.
    pub use_auto_fill: bool,
}

impl ProcessTurnCommand {
    pub fn new(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    pub fn with_form(mut self, form: impl Into<String>) -> Self {
        self.form = Some(form.into());
        self
    }

    pub fn with_client_fields(mut self, fields: FieldValues) -> Self {
        self.client_fields = fields;
        self
    }

    pub fn with_auto_fill(mut self, use_auto_fill: bool) -> Self {
        self.use_auto_fill = use_auto_fill;
        self
    }
}

/// Boundary errors. Everything else degrades to a conversational reply.
#[derive(Debug, Clone, Error)]
pub enum ProcessTurnError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Session store error: {0}")]
    Store(#[from] SessionStoreError),
}

impl From<ProcessTurnError> for DomainError {
    fn from(err: ProcessTurnError) -> Self {
        match err {
            ProcessTurnError::Validation(e) => e.into(),
            ProcessTurnError::Store(e) => e.into(),
        }
    }
}

/// Result of one turn.
#[derive(Debug, Clone)]
pub struct ProcessTurnResult {
    pub session_id: SessionId,
    pub message: String,
    pub fields: FieldValues,
    pub is_complete: bool,
    /// The form the turn ran against; `None` when no form could be used.
    pub form: Option<FormIdentifier>,
    pub deadline: Option<Timestamp>,
    pub deadline_warning: bool,
    pub deadline_passed: bool,
    /// Whether the session was persisted by this turn.
    pub persisted: bool,
}

#[derive(Debug, Clone)]
pub struct ProcessTurnConfig {
    /// Upper bound on the advisory REASON call.
    pub reason_timeout: Duration,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Days ahead of a deadline that raise `deadline_warning`.
    pub deadline_warning_days: u32,
    /// Used when neither the request nor the session names a form.
    pub default_form: Option<FormIdentifier>,
}

impl Default for ProcessTurnConfig {
    fn default() -> Self {
        Self {
            reason_timeout: Duration::from_secs(10),
            max_tokens: 300,
            temperature: 0.3,
            deadline_warning_days: 7,
            default_form: None,
        }
    }
}

/// Handler for ProcessTurn commands.
pub struct ProcessTurnHandler {
    sessions: Arc<dyn SessionRepository>,
    schemas: Arc<dyn SchemaResolver>,
    ai_provider: Arc<dyn AIProvider>,
    auto_fill: Arc<dyn AutoFillProvider>,
    deadlines: Arc<dyn DeadlineProvider>,
    locks: TurnLocks,
    config: ProcessTurnConfig,
}

impl ProcessTurnHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        schemas: Arc<dyn SchemaResolver>,
        ai_provider: Arc<dyn AIProvider>,
        auto_fill: Arc<dyn AutoFillProvider>,
        deadlines: Arc<dyn DeadlineProvider>,
    ) -> Self {
        Self {
            sessions,
            schemas,
            ai_provider,
            auto_fill,
            deadlines,
            locks: TurnLocks::new(),
            config: ProcessTurnConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ProcessTurnConfig) -> Self {
        self.config = config;
        self
    }

    pub async fn handle(&self, cmd: ProcessTurnCommand) -> Result<ProcessTurnResult, ProcessTurnError> {
        let session_id = SessionId::new(cmd.session_id.as_str())?;
        let utterance = cmd.message.trim();
        if utterance.is_empty() {
            return Err(ValidationError::empty_field("message").into());
        }
        let requested = match cmd.form.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(FormIdentifier::parse(raw)?),
            _ => None,
        };

        let _turn = self.locks.acquire(&session_id).await;
        let stored = self.sessions.get(&session_id).await?;

        let form = requested
            .or_else(|| stored.as_ref().and_then(|s| s.form().cloned()))
            .or_else(|| self.config.default_form.clone());

        let Some(form) = form else {
            if let Some((form, schema)) = self.form_named_by(utterance).await {
                return self
                    .begin_chosen_form(session_id, stored, utterance, form, &schema)
                    .await;
            }
            return self.ask_for_form(session_id, stored, utterance).await;
        };

        let schema = match self.schemas.resolve(&form).await {
            Ok(schema) => schema,
            Err(SchemaError::NotFound(raw)) => {
                warn!(session_id = %session_id, form = %raw, "form not found");
                return Ok(ProcessTurnResult {
                    fields: stored.map(|s| s.fields().clone()).unwrap_or_default(),
                    session_id,
                    message: form_not_found_message(&raw),
                    is_complete: false,
                    form: None,
                    deadline: None,
                    deadline_warning: false,
                    deadline_passed: false,
                    persisted: false,
                });
            }
        };

        let mut session = stored.unwrap_or_else(|| {
            info!(session_id = %session_id, form = %form, "session started by first turn");
            Session::new(session_id.clone(), Some(form.clone()))
        });
        session.switch_form(form.clone());

        let working = self.seed_working_values(&session, &cmd, &form).await;

        debug!(session_id = %session_id, phase = %AgentPhase::Reason, "turn phase");
        let reasoning = self.reason(&session_id, &schema, &working, utterance).await;

        let plan = pipeline::plan(&schema, &working);
        debug!(session_id = %session_id, phase = %AgentPhase::Plan, focus = ?plan.focus, "turn phase");

        let action = pipeline::act(&schema, working, &plan, utterance);
        debug!(
            session_id = %session_id,
            phase = %AgentPhase::Act,
            extracted = ?action.extracted.field_names().collect::<Vec<_>>(),
            missing = ?action.missing,
            "turn phase"
        );

        let outcome = pipeline::reflect(action, reasoning);
        debug!(
            session_id = %session_id,
            phase = %AgentPhase::Reflect,
            is_complete = outcome.is_complete,
            analysis = %outcome.analysis,
            "turn phase"
        );

        session.commit_turn(utterance, &outcome.message, &outcome.fields, outcome.is_complete);
        self.sessions.set(&session).await?;

        if outcome.is_complete {
            info!(session_id = %session_id, form = %form, "form complete");
        }

        let deadline = self.deadlines.deadline(&form).await;
        let deadline_warning = self
            .deadlines
            .warning(&form, self.config.deadline_warning_days)
            .await;
        let deadline_passed = self.deadlines.is_passed(&form).await;

        Ok(ProcessTurnResult {
            session_id,
            message: outcome.message,
            fields: session.fields().clone(),
            is_complete: outcome.is_complete,
            form: Some(form),
            deadline,
            deadline_warning,
            deadline_passed,
            persisted: true,
        })
    }

    /// Stored values, then client values and directory values into blanks.
    async fn seed_working_values(
        &self,
        session: &Session,
        cmd: &ProcessTurnCommand,
        form: &FormIdentifier,
    ) -> FieldValues {
        let mut working = session.fields().clone();
        working.merge_missing(&cmd.client_fields);

        if !cmd.use_auto_fill {
            return working;
        }
        let Some(subject) = working.get_str("studentId").map(str::to_string) else {
            debug!(session_id = %session.id(), "auto-fill skipped: no student id yet");
            return working;
        };

        match self
            .auto_fill
            .auto_fill(form, &subject, cmd.use_auto_fill, &working)
            .await
        {
            Ok(filled) => {
                debug!(session_id = %session.id(), filled = filled.len(), "auto-fill applied");
                working.merge_missing(&filled);
            }
            Err(err) => warn!(session_id = %session.id(), error = %err, "auto-fill failed"),
        }
        working
    }

    /// REASON: advisory analysis, replaced by a placeholder on failure or timeout.
    async fn reason(
        &self,
        session_id: &SessionId,
        schema: &FormSchema,
        working: &FieldValues,
        utterance: &str,
    ) -> Reasoning {
        let prompt = build_reason_prompt(schema, working, utterance);
        let provider = self.ai_provider.provider_info();
        let prompt_tokens = self.ai_provider.estimate_tokens(REASON_SYSTEM_PROMPT)
            + self.ai_provider.estimate_tokens(&prompt);
        debug!(
            session_id = %session_id,
            provider = %provider.name,
            model = %provider.model,
            prompt_tokens,
            "analysis requested"
        );

        // A zero window means the provider does not report one.
        if provider.max_context_tokens > 0
            && prompt_tokens + self.config.max_tokens > provider.max_context_tokens
        {
            warn!(
                session_id = %session_id,
                prompt_tokens,
                max_context_tokens = provider.max_context_tokens,
                "analysis skipped: prompt exceeds context window"
            );
            return Reasoning::unavailable();
        }

        let request = CompletionRequest::new(RequestMetadata::new(
            session_id.clone(),
            format!("turn-{}", uuid::Uuid::new_v4()),
        ))
        .with_system_prompt(REASON_SYSTEM_PROMPT)
        .with_message(MessageRole::User, prompt)
        .with_max_tokens(self.config.max_tokens)
        .with_temperature(self.config.temperature);

        match tokio::time::timeout(self.config.reason_timeout, self.ai_provider.complete(request)).await
        {
            Ok(Ok(response)) => Reasoning::new(response.content),
            Ok(Err(err)) => {
                warn!(session_id = %session_id, error = %err, "analysis unavailable");
                Reasoning::unavailable()
            }
            Err(_) => {
                warn!(
                    session_id = %session_id,
                    timeout_ms = self.config.reason_timeout.as_millis() as u64,
                    "analysis timed out"
                );
                Reasoning::unavailable()
            }
        }
    }

    /// A reply to the form list that is itself a resolvable form code.
    async fn form_named_by(&self, utterance: &str) -> Option<(FormIdentifier, FormSchema)> {
        let candidate = FormIdentifier::parse(utterance).ok()?;
        let schema = self.schemas.resolve(&candidate).await.ok()?;
        Some((candidate, schema))
    }

    /// Binds the session to the form picked in chat and greets with its first question.
    async fn begin_chosen_form(
        &self,
        session_id: SessionId,
        stored: Option<Session>,
        utterance: &str,
        form: FormIdentifier,
        schema: &FormSchema,
    ) -> Result<ProcessTurnResult, ProcessTurnError> {
        let status = self.deadlines.status(&form).await.map(|s| s.to_string());
        let message = welcome_message(schema, status.as_deref());

        let mut session = stored.unwrap_or_else(|| Session::new(session_id.clone(), None));
        session.switch_form(form.clone());
        session.record_exchange(utterance, &message);
        self.sessions.set(&session).await?;

        info!(session_id = %session_id, form = %form, "form chosen in chat");

        Ok(ProcessTurnResult {
            session_id,
            message,
            fields: session.fields().clone(),
            is_complete: false,
            deadline: self.deadlines.deadline(&form).await,
            deadline_warning: self
                .deadlines
                .warning(&form, self.config.deadline_warning_days)
                .await,
            deadline_passed: self.deadlines.is_passed(&form).await,
            form: Some(form),
            persisted: true,
        })
    }

    /// No form is known yet: list the choices and keep the session open.
    async fn ask_for_form(
        &self,
        session_id: SessionId,
        stored: Option<Session>,
        utterance: &str,
    ) -> Result<ProcessTurnResult, ProcessTurnError> {
        let templates: Vec<(String, String)> = self
            .schemas
            .available_forms()
            .await
            .into_iter()
            .filter(|f| f.kind == FormKind::Template)
            .map(|f| (f.id.to_string(), f.name))
            .collect();
        let message = choose_form_message(&templates);

        let mut session = stored.unwrap_or_else(|| Session::new(session_id.clone(), None));
        session.record_exchange(utterance, &message);
        self.sessions.set(&session).await?;

        Ok(ProcessTurnResult {
            session_id,
            message,
            fields: session.fields().clone(),
            is_complete: false,
            form: None,
            deadline: None,
            deadline_warning: false,
            deadline_passed: false,
            persisted: true,
        })
    }
}
