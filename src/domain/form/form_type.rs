//! The built-in form kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Forms whose schemas ship with the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormType {
    ChangeOfMajor,
    GraduationApplication,
    AddDropCourse,
}

impl FormType {
    /// Returns all built-in form types in catalog order.
    pub fn all() -> &'static [FormType] {
        &[
            FormType::ChangeOfMajor,
            FormType::GraduationApplication,
            FormType::AddDropCourse,
        ]
    }

    /// Returns the wire slug, e.g. `change-of-major`.
    pub fn slug(&self) -> &'static str {
        match self {
            FormType::ChangeOfMajor => "change-of-major",
            FormType::GraduationApplication => "graduation-application",
            FormType::AddDropCourse => "add-drop-course",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            FormType::ChangeOfMajor => "Change of Major",
            FormType::GraduationApplication => "Graduation Application",
            FormType::AddDropCourse => "Add/Drop Course",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            FormType::ChangeOfMajor => "Request to change your academic major",
            FormType::GraduationApplication => "Apply for graduation",
            FormType::AddDropCourse => "Add or drop courses for a semester",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slug())
    }
}

impl FromStr for FormType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        FormType::all()
            .iter()
            .copied()
            .find(|t| t.slug().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ValidationError::invalid_format("form_type", format!("unknown form '{}'", needle)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_returns_three_forms() {
        assert_eq!(FormType::all().len(), 3);
    }

    #[test]
    fn slug_parses_back_to_the_same_type() {
        for form in FormType::all() {
            assert_eq!(form.slug().parse::<FormType>().unwrap(), *form);
        }
    }

    #[test]
    fn parse_is_case_insensitive_and_trims() {
        assert_eq!(
            " Change-Of-Major ".parse::<FormType>().unwrap(),
            FormType::ChangeOfMajor
        );
    }

    #[test]
    fn parse_rejects_unknown_slug() {
        assert!("leave-of-absence".parse::<FormType>().is_err());
    }

    #[test]
    fn serializes_as_kebab_case_slug() {
        let json = serde_json::to_string(&FormType::AddDropCourse).unwrap();
        assert_eq!(json, "\"add-drop-course\"");
    }
}
