//! Schema resolver port.
//!
//! Maps a typed form identifier to its schema. Resolution is side-effect
//! free; an unknown or inactive form is reported as `NotFound`.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::form::{FieldDef, FormIdentifier, FormSchema};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("form not found: {0}")]
    NotFound(String),
}

/// Whether a listed form ships with the service or was uploaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormKind {
    Builtin,
    Template,
}

/// Entry in the list of forms a user can choose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSummary {
    pub id: FormIdentifier,
    pub name: String,
    pub description: String,
    pub kind: FormKind,
    pub required_field_count: usize,
}

impl FormSummary {
    pub fn from_schema(schema: &FormSchema) -> Self {
        Self {
            kind: if schema.id.is_template() {
                FormKind::Template
            } else {
                FormKind::Builtin
            },
            id: schema.id.clone(),
            name: schema.name.clone(),
            description: schema.description.clone(),
            required_field_count: schema.required_fields.len(),
        }
    }
}

#[async_trait]
pub trait SchemaResolver: Send + Sync {
    /// Resolves the full schema.
    async fn resolve(&self, id: &FormIdentifier) -> Result<FormSchema, SchemaError>;

    /// Lists every form that currently resolves.
    async fn available_forms(&self) -> Vec<FormSummary>;

    /// Required field names in question order.
    async fn required_fields(&self, id: &FormIdentifier) -> Result<Vec<String>, SchemaError> {
        Ok(self.resolve(id).await?.required_fields)
    }

    async fn optional_fields(&self, id: &FormIdentifier) -> Result<Vec<String>, SchemaError> {
        Ok(self.resolve(id).await?.optional_fields)
    }

    async fn field_def(&self, id: &FormIdentifier, name: &str) -> Result<Option<FieldDef>, SchemaError> {
        Ok(self.resolve(id).await?.field(name).cloned())
    }

    async fn question(&self, id: &FormIdentifier, name: &str) -> Result<Option<String>, SchemaError> {
        Ok(self.resolve(id).await?.question(name).map(str::to_string))
    }
}
