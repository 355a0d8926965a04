//! Chat session entity.

use serde::{Deserialize, Serialize};

use crate::domain::form::{FieldValues, FormIdentifier};
use crate::domain::foundation::{SessionId, Timestamp};

/// Who sent a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Agent,
}

/// One entry of the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: Timestamp,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp: Timestamp::now(),
        }
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Agent,
            content: content.into(),
            timestamp: Timestamp::now(),
        }
    }
}

/// State of one form-filling conversation.
///
/// # Invariants
///
/// - `fields` only gains values; a populated slot is never overwritten
/// - `history` is append-only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    id: SessionId,
    form: Option<FormIdentifier>,
    fields: FieldValues,
    history: Vec<Message>,
    is_complete: bool,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Session {
    pub fn new(id: SessionId, form: Option<FormIdentifier>) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            form,
            fields: FieldValues::new(),
            history: Vec::new(),
            is_complete: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn form(&self) -> Option<&FormIdentifier> {
        self.form.as_ref()
    }

    pub fn fields(&self) -> &FieldValues {
        &self.fields
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Points the session at a different form.
    ///
    /// Collected fields are kept; completion is recomputed on the next turn.
    pub fn switch_form(&mut self, form: FormIdentifier) {
        if self.form.as_ref() != Some(&form) {
            self.form = Some(form);
            self.is_complete = false;
            self.touch();
        }
    }

    /// Appends an agent message outside a full turn, e.g. the welcome.
    pub fn push_agent_message(&mut self, content: impl Into<String>) {
        self.history.push(Message::agent(content));
        self.touch();
    }

    /// Applies the result of one turn.
    pub fn commit_turn(
        &mut self,
        utterance: &str,
        reply: &str,
        working: &FieldValues,
        is_complete: bool,
    ) {
        self.fields.merge_missing(working);
        self.history.push(Message::user(utterance));
        self.history.push(Message::agent(reply));
        self.is_complete = is_complete;
        self.touch();
    }

    /// Appends a user/agent exchange without touching fields.
    pub fn record_exchange(&mut self, utterance: &str, reply: &str) {
        self.history.push(Message::user(utterance));
        self.history.push(Message::agent(reply));
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::FormType;

    fn session() -> Session {
        Session::new(
            SessionId::new("s-1").unwrap(),
            Some(FormIdentifier::Hardcoded(FormType::ChangeOfMajor)),
        )
    }

    #[test]
    fn new_session_is_empty_and_incomplete() {
        let s = session();
        assert!(s.fields().is_empty());
        assert!(s.history().is_empty());
        assert!(!s.is_complete());
    }

    #[test]
    fn commit_turn_appends_user_then_agent() {
        let mut s = session();
        s.commit_turn("John Smith", "Nice to meet you", &FieldValues::new(), false);

        let roles: Vec<_> = s.history().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![MessageRole::User, MessageRole::Agent]);
        assert_eq!(s.history()[0].content, "John Smith");
    }

    #[test]
    fn commit_turn_never_overwrites_fields() {
        let mut s = session();
        s.commit_turn("a", "b", &FieldValues::from_pairs([("studentName", "Ada")]), false);
        s.commit_turn("c", "d", &FieldValues::from_pairs([("studentName", "Eve")]), false);

        assert_eq!(s.fields().get_str("studentName"), Some("Ada"));
    }

    #[test]
    fn switch_form_keeps_fields_and_resets_completion() {
        let mut s = session();
        s.commit_turn("a", "b", &FieldValues::from_pairs([("email", "a@b.com")]), true);
        s.switch_form(FormIdentifier::Hardcoded(FormType::AddDropCourse));

        assert!(!s.is_complete());
        assert_eq!(s.fields().get_str("email"), Some("a@b.com"));
        assert_eq!(
            s.form(),
            Some(&FormIdentifier::Hardcoded(FormType::AddDropCourse))
        );
    }

    #[test]
    fn session_round_trips_through_json() {
        let mut s = session();
        s.commit_turn("hi", "hello", &FieldValues::from_pairs([("studentId", "9")]), false);

        let json = serde_json::to_string(&s).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
        assert!(json.contains("\"form\":\"change-of-major\""));
    }
}
