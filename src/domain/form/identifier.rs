//! Typed form identifiers.
//!
//! The wire carries a single ambiguous string for "which form". It is
//! resolved once, here, into either a built-in form or an uploaded template
//! and passed downward typed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::FormType;
use crate::domain::foundation::{TemplateId, ValidationError};

/// Identifies the form a session is filling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FormIdentifier {
    Hardcoded(FormType),
    Template(TemplateId),
}

impl FormIdentifier {
    /// Resolves a raw identifier string.
    ///
    /// Known built-in slugs become `Hardcoded`; any other non-empty value is
    /// taken to be a template id.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ValidationError::empty_field("form_type"));
        }
        match raw.parse::<FormType>() {
            Ok(form_type) => Ok(FormIdentifier::Hardcoded(form_type)),
            Err(_) => Ok(FormIdentifier::Template(TemplateId::new(raw)?)),
        }
    }

    /// Returns the built-in form type, if any.
    pub fn form_type(&self) -> Option<FormType> {
        match self {
            FormIdentifier::Hardcoded(t) => Some(*t),
            FormIdentifier::Template(_) => None,
        }
    }

    pub fn is_template(&self) -> bool {
        matches!(self, FormIdentifier::Template(_))
    }
}

impl From<FormType> for FormIdentifier {
    fn from(form_type: FormType) -> Self {
        FormIdentifier::Hardcoded(form_type)
    }
}

impl From<TemplateId> for FormIdentifier {
    fn from(id: TemplateId) -> Self {
        FormIdentifier::Template(id)
    }
}

impl fmt::Display for FormIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormIdentifier::Hardcoded(t) => write!(f, "{}", t.slug()),
            FormIdentifier::Template(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for FormIdentifier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FormIdentifier {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FormIdentifier> for String {
    fn from(id: FormIdentifier) -> Self {
        id.to_string()
    }
}
