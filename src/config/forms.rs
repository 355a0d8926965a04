//! Form catalog configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::adapters::deadlines::parse_deadline;
use crate::domain::form::FormIdentifier;
use crate::domain::foundation::Timestamp;

#[derive(Debug, Clone, Deserialize)]
pub struct FormsConfig {
    /// Form used when a request names none
    pub default_form: Option<String>,

    /// YAML file of uploaded templates loaded at startup
    pub templates_path: Option<PathBuf>,

    /// Days before a deadline that raise a warning
    #[serde(default = "default_warning_days")]
    pub deadline_warning_days: u32,

    /// Comma-separated `form=date` pairs, e.g.
    /// `add-drop-course=2026-09-15,graduation-application=2026-03-01`
    pub deadlines: Option<String>,
}

impl FormsConfig {
    pub fn default_form(&self) -> Result<Option<FormIdentifier>, ValidationError> {
        match self.default_form.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => FormIdentifier::parse(raw)
                .map(Some)
                .map_err(|_| ValidationError::InvalidForm(raw.to_string())),
            _ => Ok(None),
        }
    }

    pub fn deadline_entries(&self) -> Result<Vec<(FormIdentifier, Timestamp)>, ValidationError> {
        let Some(raw) = self.deadlines.as_deref() else {
            return Ok(Vec::new());
        };

        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let (form, date) = entry
                    .split_once('=')
                    .ok_or_else(|| ValidationError::InvalidDeadline(entry.to_string()))?;
                let form = FormIdentifier::parse(form)
                    .map_err(|_| ValidationError::InvalidDeadline(entry.to_string()))?;
                let date = parse_deadline(date)
                    .map_err(|_| ValidationError::InvalidDeadline(entry.to_string()))?;
                Ok((form, date))
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.default_form()?;
        self.deadline_entries()?;
        Ok(())
    }
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            default_form: None,
            templates_path: None,
            deadline_warning_days: default_warning_days(),
            deadlines: None,
        }
    }
}

fn default_warning_days() -> u32 {
    7
}
