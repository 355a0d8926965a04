//! Uploaded form templates.

use serde::{Deserialize, Serialize};

use super::questions::generated_question;
use super::{FieldDef, FormIdentifier, FormSchema};
use crate::domain::foundation::{TemplateId, Timestamp, ValidationError};

/// A form described by an uploaded document rather than built in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormTemplate {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    pub required_fields: Vec<String>,
    #[serde(default)]
    pub optional_fields: Vec<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub uploaded_at: Timestamp,
}

fn default_active() -> bool {
    true
}

impl FormTemplate {
    /// Creates an active template uploaded now.
    pub fn new(
        id: TemplateId,
        name: impl Into<String>,
        fields: Vec<FieldDef>,
        required_fields: Vec<String>,
        optional_fields: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let template = Self {
            id,
            name: name.into(),
            description: String::new(),
            fields,
            required_fields,
            optional_fields,
            is_active: true,
            uploaded_at: Timestamp::now(),
        };
        template.validate()?;
        Ok(template)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Checks the template is usable as a form.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if self.required_fields.is_empty() {
            return Err(ValidationError::empty_field("required_fields"));
        }
        if let Some(blank) = self
            .fields
            .iter()
            .map(|f| f.name.as_str())
            .chain(self.required_fields.iter().map(String::as_str))
            .find(|n| n.trim().is_empty())
        {
            return Err(ValidationError::invalid_format(
                "fields",
                format!("blank field name '{}'", blank),
            ));
        }
        Ok(())
    }

    /// Builds the schema, generating questions for fields that lack one.
    pub fn to_schema(&self) -> FormSchema {
        let defs = self
            .fields
            .iter()
            .cloned()
            .map(|mut def| {
                if def.label.trim().is_empty() {
                    def.label = FieldDef::new(def.name.clone()).label;
                }
                if def.question.as_deref().map(str::trim).unwrap_or("").is_empty() {
                    def.question = Some(generated_question(&def.name));
                }
                def
            })
            .collect();

        let mut schema = FormSchema::new(
            FormIdentifier::Template(self.id.clone()),
            self.name.clone(),
            self.description.clone(),
            self.required_fields.clone(),
            self.optional_fields.clone(),
            defs,
        );
        // synthesised definitions still need a question
        for def in &mut schema.fields {
            if def.question.is_none() {
                def.question = Some(generated_question(&def.name));
            }
        }
        schema
    }
}
