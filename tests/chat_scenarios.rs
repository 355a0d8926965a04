//! End-to-end conversation scenarios driven through the application handlers.
//!
//! Every test wires the real in-memory adapters and a queued mock text
//! generator, then plays a short conversation turn by turn.

use std::sync::Arc;

use form_assistant::adapters::ai::MockAIProvider;
use form_assistant::adapters::deadlines::InMemoryDeadlineCalendar;
use form_assistant::adapters::forms::{CatalogSchemaResolver, TemplateCatalog};
use form_assistant::adapters::sessions::InMemorySessionRepository;
use form_assistant::adapters::students::InMemoryStudentDirectory;
use form_assistant::application::{
    ProcessTurnCommand, ProcessTurnHandler, StartSessionCommand, StartSessionHandler,
};
use form_assistant::domain::foundation::{SessionId, TemplateId};
use form_assistant::domain::form::{FieldDef, FormTemplate};
use form_assistant::ports::SessionRepository;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Harness {
    start: StartSessionHandler,
    turns: ProcessTurnHandler,
    sessions: Arc<InMemorySessionRepository>,
}

async fn harness() -> Harness {
    let catalog = TemplateCatalog::new();
    catalog
        .add(
            FormTemplate::new(
                TemplateId::new("major-request").unwrap(),
                "Major Request",
                vec![
                    FieldDef::new("studentId").with_question("What is your student ID number?"),
                    FieldDef::new("desiredMajor").with_question("Which major would you like?"),
                ],
                vec!["studentName".into(), "studentId".into(), "desiredMajor".into()],
                vec![],
            )
            .unwrap(),
        )
        .await
        .unwrap();
    catalog
        .add(
            FormTemplate::new(
                TemplateId::new("contact-update").unwrap(),
                "Contact Update",
                vec![],
                vec!["email".into(), "phone".into()],
                vec![],
            )
            .unwrap(),
        )
        .await
        .unwrap();

    let sessions = Arc::new(InMemorySessionRepository::default());
    let schemas = Arc::new(CatalogSchemaResolver::new(catalog));
    let deadlines = Arc::new(InMemoryDeadlineCalendar::new());

    let start = StartSessionHandler::new(sessions.clone(), schemas.clone(), deadlines.clone());
    let turns = ProcessTurnHandler::new(
        sessions.clone(),
        schemas,
        Arc::new(MockAIProvider::new()),
        Arc::new(InMemoryStudentDirectory::new()),
        deadlines,
    );

    Harness {
        start,
        turns,
        sessions,
    }
}

fn sid(raw: &str) -> SessionId {
    SessionId::new(raw).unwrap()
}

// =============================================================================
// Scenario A: three required fields filled over three turns
// =============================================================================

#[tokio::test]
async fn three_field_form_completes_after_three_answers() {
    let h = harness().await;

    let first = h
        .turns
        .handle(ProcessTurnCommand::new("a-1", "John Smith").with_form("major-request"))
        .await
        .unwrap();
    assert_eq!(first.fields.get_str("studentName"), Some("John Smith"));
    assert!(!first.is_complete);
    assert!(first.message.contains("What is your student ID number?"));

    let second = h
        .turns
        .handle(ProcessTurnCommand::new("a-1", "12345"))
        .await
        .unwrap();
    assert_eq!(second.fields.get_str("studentId"), Some("12345"));
    assert!(!second.is_complete);
    assert!(second.message.contains("Which major would you like?"));

    let third = h
        .turns
        .handle(ProcessTurnCommand::new("a-1", "Computer Science"))
        .await
        .unwrap();
    assert_eq!(third.fields.get_str("desiredMajor"), Some("Computer Science"));
    assert!(third.is_complete);
    for value in ["John Smith", "12345", "Computer Science"] {
        assert!(third.message.contains(value), "summary should list {value}");
    }

    let stored = h.sessions.get(&sid("a-1")).await.unwrap().unwrap();
    assert!(stored.is_complete());
    assert_eq!(stored.history().len(), 6);
}

// =============================================================================
// Scenario B: several fields from one utterance
// =============================================================================

#[tokio::test]
async fn email_and_phone_are_captured_in_one_turn() {
    let h = harness().await;

    let result = h
        .turns
        .handle(
            ProcessTurnCommand::new("b-1", "My email is a@b.com and my number is 555-123-4567")
                .with_form("contact-update"),
        )
        .await
        .unwrap();

    assert_eq!(result.fields.get_str("email"), Some("a@b.com"));
    assert_eq!(result.fields.get_str("phone"), Some("555-123-4567"));
    assert!(result.is_complete);
}

// =============================================================================
// Scenario C: small talk leaves fields untouched
// =============================================================================

#[tokio::test]
async fn thanks_is_acknowledged_and_question_repeated() {
    let h = harness().await;

    let result = h
        .turns
        .handle(ProcessTurnCommand::new("c-1", "thanks").with_form("change-of-major"))
        .await
        .unwrap();

    assert!(result.fields.is_empty());
    assert!(!result.is_complete);
    assert!(result.message.starts_with("You're welcome!"));
    assert!(result.message.contains("What is your full name?"));
}

// =============================================================================
// Scenario D: unknown form identifier
// =============================================================================

#[tokio::test]
async fn unknown_form_apologises_and_creates_nothing() {
    let h = harness().await;

    let result = h
        .turns
        .handle(ProcessTurnCommand::new("d-1", "hello").with_form("does-not-exist"))
        .await
        .unwrap();

    assert!(!result.is_complete);
    assert!(result.message.contains("couldn't find"));
    assert!(h.sessions.get(&sid("d-1")).await.unwrap().is_none());
}

#[tokio::test]
async fn unknown_form_at_start_returns_no_session() {
    let h = harness().await;

    let started = h
        .start
        .handle(StartSessionCommand::for_form("does-not-exist"))
        .await
        .unwrap();

    assert!(started.session_id.is_none());
    assert_eq!(h.sessions.len().await, 0);
}

// =============================================================================
// Started sessions carry on through turns
// =============================================================================

#[tokio::test]
async fn started_session_keeps_its_form_for_later_turns() {
    let h = harness().await;

    let started = h
        .start
        .handle(StartSessionCommand::for_form("major-request"))
        .await
        .unwrap();
    let session_id = started.session_id.unwrap();

    let result = h
        .turns
        .handle(ProcessTurnCommand::new(session_id.as_str(), "John Smith"))
        .await
        .unwrap();

    assert_eq!(result.fields.get_str("studentName"), Some("John Smith"));
    assert_eq!(result.form.map(|f| f.to_string()), Some("major-request".to_string()));
}
