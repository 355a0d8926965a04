//! In-memory catalog of uploaded form templates.
//!
//! Optionally seeded from a YAML file holding a list of templates.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;

use crate::domain::form::FormTemplate;
use crate::domain::foundation::{TemplateId, ValidationError};

/// Errors raised while managing templates.
#[derive(Debug, thiserror::Error)]
pub enum TemplateCatalogError {
    #[error("failed to read templates file: {0}")]
    Io(String),

    #[error("failed to parse templates file: {0}")]
    Parse(String),

    #[error("invalid template: {0}")]
    Invalid(#[from] ValidationError),

    #[error("template not found: {0}")]
    NotFound(TemplateId),
}

#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Arc<RwLock<HashMap<TemplateId, FormTemplate>>>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads templates from a YAML file and returns how many were added.
    pub async fn load_yaml<P: AsRef<Path>>(&self, path: P) -> Result<usize, TemplateCatalogError> {
        let content = fs::read_to_string(path.as_ref())
            .await
            .map_err(|e| TemplateCatalogError::Io(e.to_string()))?;

        let templates: Vec<FormTemplate> = serde_yaml::from_str(&content)
            .map_err(|e| TemplateCatalogError::Parse(e.to_string()))?;

        let count = templates.len();
        for template in templates {
            self.add(template).await?;
        }
        Ok(count)
    }

    /// Adds or replaces a template.
    pub async fn add(&self, template: FormTemplate) -> Result<(), TemplateCatalogError> {
        template.validate()?;
        tracing::debug!(template_id = %template.id, name = %template.name, "template stored");
        self.templates
            .write()
            .await
            .insert(template.id.clone(), template);
        Ok(())
    }

    pub async fn get(&self, id: &TemplateId) -> Option<FormTemplate> {
        self.templates.read().await.get(id).cloned()
    }

    /// All templates, newest upload first.
    pub async fn list(&self) -> Vec<FormTemplate> {
        let mut all: Vec<FormTemplate> = self.templates.read().await.values().cloned().collect();
        all.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then_with(|| a.id.cmp(&b.id)));
        all
    }

    pub async fn list_active(&self) -> Vec<FormTemplate> {
        self.list().await.into_iter().filter(|t| t.is_active).collect()
    }

    /// Flips the active flag and returns its new value.
    pub async fn toggle_active(&self, id: &TemplateId) -> Result<bool, TemplateCatalogError> {
        let mut templates = self.templates.write().await;
        let template = templates
            .get_mut(id)
            .ok_or_else(|| TemplateCatalogError::NotFound(id.clone()))?;
        template.is_active = !template.is_active;
        Ok(template.is_active)
    }

    pub async fn remove(&self, id: &TemplateId) -> bool {
        self.templates.write().await.remove(id).is_some()
    }

    pub async fn len(&self) -> usize {
        self.templates.read().await.len()
    }
}
