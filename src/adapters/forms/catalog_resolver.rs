//! Schema resolution over the built-in forms and the template catalog.

use async_trait::async_trait;

use super::TemplateCatalog;
use crate::domain::form::{builtin_schema, FormIdentifier, FormSchema, FormType};
use crate::ports::{FormSummary, SchemaError, SchemaResolver};

/// Resolves built-in forms directly and templates through the catalog.
///
/// Inactive templates are treated as unknown.
#[derive(Debug, Clone)]
pub struct CatalogSchemaResolver {
    templates: TemplateCatalog,
}

impl CatalogSchemaResolver {
    pub fn new(templates: TemplateCatalog) -> Self {
        Self { templates }
    }

    pub fn templates(&self) -> &TemplateCatalog {
        &self.templates
    }
}

#[async_trait]
impl SchemaResolver for CatalogSchemaResolver {
    async fn resolve(&self, id: &FormIdentifier) -> Result<FormSchema, SchemaError> {
        match id {
            FormIdentifier::Hardcoded(form_type) => Ok(builtin_schema(*form_type)),
            FormIdentifier::Template(template_id) => self
                .templates
                .get(template_id)
                .await
                .filter(|t| t.is_active)
                .map(|t| t.to_schema())
                .ok_or_else(|| SchemaError::NotFound(id.to_string())),
        }
    }

    async fn available_forms(&self) -> Vec<FormSummary> {
        let mut forms: Vec<FormSummary> = FormType::all()
            .iter()
            .map(|t| FormSummary::from_schema(&builtin_schema(*t)))
            .collect();
        forms.extend(
            self.templates
                .list_active()
                .await
                .iter()
                .map(|t| FormSummary::from_schema(&t.to_schema())),
        );
        forms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::FormTemplate;
    use crate::domain::foundation::TemplateId;
    use crate::ports::FormKind;

    async fn resolver_with_template() -> CatalogSchemaResolver {
        let catalog = TemplateCatalog::new();
        catalog
            .add(
                FormTemplate::new(
                    TemplateId::new("parking").unwrap(),
                    "Parking Permit",
                    vec![],
                    vec!["studentName".into(), "expectedGraduationDate".into()],
                    vec!["reason".into()],
                )
                .unwrap(),
            )
            .await
            .unwrap();
        CatalogSchemaResolver::new(catalog)
    }

    #[tokio::test]
    async fn resolves_builtin_forms() {
        let resolver = CatalogSchemaResolver::new(TemplateCatalog::new());
        let schema = resolver
            .resolve(&FormIdentifier::Hardcoded(FormType::ChangeOfMajor))
            .await
            .unwrap();
        assert_eq!(schema.name, "Change of Major");
        assert_eq!(schema.required_fields.len(), 7);
    }

    #[tokio::test]
    async fn resolves_templates_with_generated_questions() {
        let resolver = resolver_with_template().await;
        let id = FormIdentifier::parse("parking").unwrap();

        let question = resolver.question(&id, "studentName").await.unwrap();
        assert_eq!(question.as_deref(), Some("What is your student name?"));

        let question = resolver.question(&id, "expectedGraduationDate").await.unwrap();
        assert_eq!(question.as_deref(), Some("What is the expected graduation date?"));

        let question = resolver.question(&id, "reason").await.unwrap();
        assert_eq!(question.as_deref(), Some("Please provide reason:"));
    }

    #[tokio::test]
    async fn unknown_template_is_not_found() {
        let resolver = CatalogSchemaResolver::new(TemplateCatalog::new());
        let result = resolver.resolve(&FormIdentifier::parse("nope").unwrap()).await;
        assert_eq!(result, Err(SchemaError::NotFound("nope".into())));
    }

    #[tokio::test]
    async fn inactive_template_is_not_found() {
        let resolver = resolver_with_template().await;
        let template_id = TemplateId::new("parking").unwrap();
        resolver.templates().toggle_active(&template_id).await.unwrap();

        let result = resolver.resolve(&FormIdentifier::Template(template_id)).await;
        assert!(matches!(result, Err(SchemaError::NotFound(_))));
    }

    #[tokio::test]
    async fn lists_builtins_then_active_templates() {
        let resolver = resolver_with_template().await;
        let forms = resolver.available_forms().await;

        assert_eq!(forms.len(), 4);
        assert!(forms[..3].iter().all(|f| f.kind == FormKind::Builtin));
        assert_eq!(forms[3].kind, FormKind::Template);
        assert_eq!(forms[3].name, "Parking Permit");
    }

    #[tokio::test]
    async fn required_fields_follow_declared_order() {
        let resolver = CatalogSchemaResolver::new(TemplateCatalog::new());
        let required = resolver
            .required_fields(&FormIdentifier::Hardcoded(FormType::AddDropCourse))
            .await
            .unwrap();
        assert_eq!(required, vec!["studentName", "studentId", "semester", "year", "email"]);
    }
}
