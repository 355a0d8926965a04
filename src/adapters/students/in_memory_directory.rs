//! Consent-gated student directory used for auto-fill.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::form::{FieldValues, FormIdentifier, FormType};
use crate::domain::foundation::DomainError;
use crate::ports::AutoFillProvider;

/// Profile data a student agreed to share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub student_id: String,
    pub student_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub current_major: Option<String>,
    #[serde(default)]
    pub advisor_name: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub consent_given: bool,
}

impl StudentRecord {
    /// Fields shared with every form, then the ones only Change of Major uses.
    fn fields_for(&self, form: &FormIdentifier) -> Vec<(&'static str, Option<&str>)> {
        let mut fields = vec![
            ("studentName", Some(self.student_name.as_str())),
            ("studentId", Some(self.student_id.as_str())),
            ("email", Some(self.email.as_str())),
            ("phone", self.phone.as_deref()),
        ];
        if form.form_type() == Some(FormType::ChangeOfMajor) {
            fields.extend([
                ("currentMajor", self.current_major.as_deref()),
                ("advisorName", self.advisor_name.as_deref()),
                ("department", self.department.as_deref()),
            ]);
        }
        fields
    }
}

/// In-memory student directory.
///
/// Records without consent are never stored.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStudentDirectory {
    records: Arc<RwLock<HashMap<String, StudentRecord>>>,
}

impl InMemoryStudentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the record when consent was given. Returns whether it was kept.
    pub async fn store(&self, record: StudentRecord) -> bool {
        if !record.consent_given {
            tracing::debug!(student_id = %record.student_id, "record without consent ignored");
            return false;
        }
        self.records
            .write()
            .await
            .insert(record.student_id.clone(), record);
        true
    }

    pub async fn get(&self, student_id: &str) -> Option<StudentRecord> {
        self.records.read().await.get(student_id).cloned()
    }

    /// Removes one student's data.
    pub async fn clear(&self, student_id: &str) -> bool {
        self.records.write().await.remove(student_id).is_some()
    }
}

#[async_trait]
impl AutoFillProvider for InMemoryStudentDirectory {
    async fn auto_fill(
        &self,
        form: &FormIdentifier,
        subject_id: &str,
        consent_given: bool,
        existing: &FieldValues,
    ) -> Result<FieldValues, DomainError> {
        if !consent_given {
            return Ok(FieldValues::new());
        }

        let records = self.records.read().await;
        let Some(record) = records.get(subject_id.trim()) else {
            return Ok(FieldValues::new());
        };

        let mut filled = FieldValues::new();
        for (name, value) in record.fields_for(form) {
            if let Some(value) = value {
                if existing.is_blank(name) {
                    filled.fill_blank(name, Value::String(value.to_string()));
                }
            }
        }
        Ok(filled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::TemplateId;

    fn record(consent: bool) -> StudentRecord {
        StudentRecord {
            student_id: "Z123".into(),
            student_name: "Jane Doe".into(),
            email: "jane@uni.edu".into(),
            phone: None,
            current_major: Some("Biology".into()),
            advisor_name: Some("Dr. Smith".into()),
            department: Some("Sciences".into()),
            consent_given: consent,
        }
    }

    fn change_of_major() -> FormIdentifier {
        FormIdentifier::Hardcoded(FormType::ChangeOfMajor)
    }

    mod storage {
        use super::*;

        #[tokio::test]
        async fn refuses_records_without_consent() {
            let directory = InMemoryStudentDirectory::new();
            assert!(!directory.store(record(false)).await);
            assert!(directory.get("Z123").await.is_none());
        }

        #[tokio::test]
        async fn clear_removes_record() {
            let directory = InMemoryStudentDirectory::new();
            assert!(directory.store(record(true)).await);
            assert!(directory.clear("Z123").await);
            assert!(directory.get("Z123").await.is_none());
        }
    }

    mod auto_fill {
        use super::*;

        #[tokio::test]
        async fn fills_major_specific_fields_for_change_of_major() {
            let directory = InMemoryStudentDirectory::new();
            directory.store(record(true)).await;

            let filled = directory
                .auto_fill(&change_of_major(), "Z123", true, &FieldValues::new())
                .await
                .unwrap();

            assert_eq!(filled.get_str("studentName"), Some("Jane Doe"));
            assert_eq!(filled.get_str("currentMajor"), Some("Biology"));
            assert_eq!(filled.get_str("department"), Some("Sciences"));
            assert!(filled.is_blank("phone"));
        }

        #[tokio::test]
        async fn other_forms_get_common_fields_only() {
            let directory = InMemoryStudentDirectory::new();
            directory.store(record(true)).await;

            let filled = directory
                .auto_fill(
                    &FormIdentifier::Hardcoded(FormType::AddDropCourse),
                    "Z123",
                    true,
                    &FieldValues::new(),
                )
                .await
                .unwrap();

            assert_eq!(filled.get_str("email"), Some("jane@uni.edu"));
            assert!(filled.is_blank("currentMajor"));

            let template = FormIdentifier::Template(TemplateId::new("tpl").unwrap());
            let filled = directory
                .auto_fill(&template, "Z123", true, &FieldValues::new())
                .await
                .unwrap();
            assert_eq!(filled.len(), 3);
        }

        #[tokio::test]
        async fn never_replaces_existing_values() {
            let directory = InMemoryStudentDirectory::new();
            directory.store(record(true)).await;
            let existing = FieldValues::from_pairs([("studentName", "Janet D")]);

            let filled = directory
                .auto_fill(&change_of_major(), "Z123", true, &existing)
                .await
                .unwrap();

            assert!(filled.get("studentName").is_none());
            assert_eq!(filled.get_str("studentId"), Some("Z123"));
        }

        #[tokio::test]
        async fn nothing_without_consent_or_record() {
            let directory = InMemoryStudentDirectory::new();
            directory.store(record(true)).await;

            let filled = directory
                .auto_fill(&change_of_major(), "Z123", false, &FieldValues::new())
                .await
                .unwrap();
            assert!(filled.is_empty());

            let filled = directory
                .auto_fill(&change_of_major(), "Z999", true, &FieldValues::new())
                .await
                .unwrap();
            assert!(filled.is_empty());
        }
    }
}
