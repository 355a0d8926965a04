//! Field extraction from free text.
//!
//! [`extract`] is a pure function of the utterance, the current field values,
//! the focus field and the schema. It only ever proposes values for fields
//! that are blank in `current`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use super::utterance::{is_filler, is_purely_numeric};
use crate::domain::form::{FieldRole, FieldType, FieldValues, FormSchema};

static NAME_INTRO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:my name is|i'm|i am|this is|name is)\s+([a-z][a-z\s'-]*)").unwrap()
});
static WHOLE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]+(?:\s[A-Z][a-z]+){0,3}$").unwrap());

static ID_RES: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        Regex::new(r"(?i)\bz[\s-]?(\d+)\b").unwrap(),
        Regex::new(r"(?i)\bstudent id[\s:]*(\d+)").unwrap(),
        Regex::new(r"(?i)\bid[\s:]*(\d+)").unwrap(),
        Regex::new(r"^(\d{1,10})$").unwrap(),
    ]
});

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._-]+@[a-zA-Z0-9._-]+\.[a-zA-Z0-9_-]+").unwrap());
static EMAIL_EXACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._-]+@[a-zA-Z0-9._-]+\.[a-zA-Z0-9_-]+$").unwrap());
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b").unwrap());
static PHONE_EXACT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?\d{3}[-.\s]?\d{3}[-.\s]?\d{4}$").unwrap());

static ADVISOR_RES: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"(?i)\badvis[eo]r(?:\s+is)?[:\s]+(.+)$").unwrap(),
        Regex::new(r"(?i)\bprofessor\s+([a-z][a-z\s.'-]*)").unwrap(),
        Regex::new(r"(?i)\bdr\.?\s+([a-z][a-z\s.'-]*)").unwrap(),
    ]
});

const NAME_STOP_WORDS: &[&str] = &["and", "my", "i", "with", "from", "but"];
const MAX_NAME_WORDS: usize = 4;
const FREE_TEXT_MIN_CHARS: usize = 20;

/// Newly discovered field values from one utterance.
///
/// Never serialized; it lives for a single turn.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    fields: BTreeMap<String, String>,
}

impl ExtractionResult {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.fields.insert(name.to_string(), value.into());
    }
}

/// Extracts field values from `utterance`.
///
/// Precedence:
/// 1. filler utterances never feed the focus field
/// 2. a non-numeric, non-filler utterance the focus field accepts is taken
///    whole and nothing else is extracted
/// 3. otherwise every blank field with a role gets one independent attempt
pub fn extract(
    utterance: &str,
    current: &FieldValues,
    focus: Option<&str>,
    schema: &FormSchema,
) -> ExtractionResult {
    let mut result = ExtractionResult::default();
    let trimmed = utterance.trim();
    if trimmed.is_empty() {
        return result;
    }
    let filler = is_filler(trimmed);
    let numeric = is_purely_numeric(trimmed);

    if let Some(focus) = focus {
        if !numeric && !filler && current.is_blank(focus) && focus_accepts(schema.role_of(focus), trimmed) {
            result.insert(focus, trimmed);
            return result;
        }
    }

    let blank_with_role = |role: FieldRole| {
        schema
            .fields_with_role(role)
            .find(|f| current.is_blank(&f.name))
            .map(|f| f.name.as_str())
    };

    let mut whole_utterance_name = false;
    if let Some(field) = blank_with_role(FieldRole::PersonName) {
        if let Some(name) = intro_name(trimmed) {
            result.insert(field, name);
        } else if !filler && looks_like_whole_name(trimmed) {
            result.insert(field, trimmed);
            whole_utterance_name = true;
        }
    }

    if let Some(field) = blank_with_role(FieldRole::StudentId) {
        if !whole_utterance_name {
            if let Some(id) = student_id(trimmed) {
                result.insert(field, id);
            }
        }
    }

    if let Some(field) = blank_with_role(FieldRole::Email) {
        if let Some(m) = EMAIL_RE.find(trimmed) {
            result.insert(field, m.as_str());
        }
    }

    if let Some(field) = blank_with_role(FieldRole::Phone) {
        if let Some(m) = PHONE_RE.find(trimmed) {
            result.insert(field, m.as_str());
        }
    }

    if let Some(field) = blank_with_role(FieldRole::Advisor) {
        if let Some(advisor) = advisor_name(trimmed) {
            result.insert(field, advisor);
        }
    }

    // A bare number nothing else claimed answers a numeric focus field.
    if result.is_empty() && numeric {
        if let Some(focus) = focus {
            let numeric_focus = schema
                .field(focus)
                .map(|f| f.field_type == FieldType::Number)
                .unwrap_or(false);
            if numeric_focus && current.is_blank(focus) {
                result.insert(focus, trimmed);
            }
        }
    }

    if result.is_empty() && trimmed.chars().count() > FREE_TEXT_MIN_CHARS {
        if let Some(field) = schema.free_text_field() {
            if current.is_blank(&field.name) {
                result.insert(&field.name, trimmed);
            }
        }
    }

    result
}

/// Whether the focus field's validator accepts the whole utterance.
///
/// Roles without a validator accept anything.
fn focus_accepts(role: FieldRole, text: &str) -> bool {
    match role {
        FieldRole::PersonName => {
            text.chars().count() >= 2 && text.chars().any(|c| c.is_alphabetic())
        }
        FieldRole::Email => EMAIL_EXACT_RE.is_match(text),
        FieldRole::Phone => PHONE_EXACT_RE.is_match(text),
        FieldRole::StudentId => {
            text.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                && text.chars().any(|c| c.is_ascii_digit())
        }
        FieldRole::Advisor | FieldRole::FreeText | FieldRole::Other => true,
    }
}

fn intro_name(text: &str) -> Option<String> {
    let captured = NAME_INTRO_RE.captures(text)?.get(1)?.as_str();
    let words: Vec<&str> = captured
        .split_whitespace()
        .take_while(|w| !NAME_STOP_WORDS.contains(&w.to_lowercase().as_str()))
        .take(MAX_NAME_WORDS)
        .collect();
    let name = words
        .join(" ")
        .trim_matches(|c| c == '\'' || c == '-')
        .to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn looks_like_whole_name(text: &str) -> bool {
    text.chars().count() >= 2 && WHOLE_NAME_RE.is_match(text)
}

fn student_id(text: &str) -> Option<String> {
    ID_RES.iter().find_map(|re| {
        let digits = re.captures(text)?.get(1)?.as_str();
        Some(digits.to_string())
    })
}

fn advisor_name(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let mentioned = lower.contains("advisor")
        || lower.contains("adviser")
        || lower.contains("professor")
        || lower.contains("dr.")
        || lower.contains("dr ");
    if !mentioned {
        return None;
    }

    let from_pattern = ADVISOR_RES.iter().find_map(|re| {
        let captured = re.captures(text)?.get(1)?.as_str();
        let name = captured
            .split_whitespace()
            .take(MAX_NAME_WORDS)
            .collect::<Vec<_>>()
            .join(" ");
        let name = name.trim_end_matches(|c| matches!(c, '.' | ',' | '!' | '?')).trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    });

    Some(from_pattern.unwrap_or_else(|| text.to_string()))
}
