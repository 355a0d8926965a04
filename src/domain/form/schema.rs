//! Form schemas and field definitions.

use serde::{Deserialize, Serialize};

use super::field_role::FieldRole;
use super::field_values::FieldValues;
use super::identifier::FormIdentifier;
use super::questions::{label_for, split_words};

/// Name words that mark a phone number field.
const PHONE_WORDS: &[&str] = &["tel", "telephone", "mobile", "cell"];

/// Input kind of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Email,
    #[serde(alias = "tel")]
    Phone,
    Date,
    Number,
    Textarea,
    Checkbox,
    Select,
    List,
}

impl FieldType {
    /// Guesses the input kind from a field name.
    pub fn infer_from_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        let words: Vec<String> = split_words(name).iter().map(|w| w.to_lowercase()).collect();
        if lower.contains("email") {
            FieldType::Email
        } else if words
            .iter()
            .any(|w| w.ends_with("phone") || PHONE_WORDS.contains(&w.as_str()))
        {
            FieldType::Phone
        } else if lower.contains("date") {
            FieldType::Date
        } else if lower.contains("address") || lower.contains("reason") || lower.contains("description") {
            FieldType::Textarea
        } else if lower.contains("honors") {
            FieldType::Checkbox
        } else if lower.starts_with("courses") {
            FieldType::List
        } else if lower == "year" {
            FieldType::Number
        } else {
            FieldType::Text
        }
    }
}

impl Default for FieldType {
    fn default() -> Self {
        FieldType::Text
    }
}

/// One field of a form.
///
/// A template that omits `type` gets one inferred from the name; a declared
/// type is kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawFieldDef")]
pub struct FieldDef {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFieldDef {
    name: String,
    #[serde(default)]
    label: String,
    #[serde(rename = "type", default)]
    field_type: Option<FieldType>,
    #[serde(default, alias = "isRequired")]
    required: bool,
    #[serde(default)]
    question: Option<String>,
}

impl From<RawFieldDef> for FieldDef {
    fn from(raw: RawFieldDef) -> Self {
        Self {
            field_type: raw
                .field_type
                .unwrap_or_else(|| FieldType::infer_from_name(&raw.name)),
            name: raw.name,
            label: raw.label,
            required: raw.required,
            question: raw.question,
        }
    }
}

impl FieldDef {
    /// Creates a field with label and type derived from its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: label_for(&name),
            field_type: FieldType::infer_from_name(&name),
            required: false,
            question: None,
            name,
        }
    }

    pub fn with_type(mut self, field_type: FieldType) -> Self {
        self.field_type = field_type;
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Label to show users, falling back to the raw name.
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.name
        } else {
            &self.label
        }
    }

    pub fn role(&self) -> FieldRole {
        FieldRole::infer(self)
    }
}

/// Resolved description of a form.
///
/// # Invariants
///
/// - every name in `required_fields` and `optional_fields` has a `FieldDef`
/// - `required_fields` order is the question order and never changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSchema {
    pub id: FormIdentifier,
    pub name: String,
    pub description: String,
    pub fields: Vec<FieldDef>,
    pub required_fields: Vec<String>,
    pub optional_fields: Vec<String>,
}

impl FormSchema {
    /// Builds a schema, synthesising a definition for any listed field that
    /// has none and syncing the `required` flags with `required_fields`.
    pub fn new(
        id: FormIdentifier,
        name: impl Into<String>,
        description: impl Into<String>,
        required_fields: Vec<String>,
        optional_fields: Vec<String>,
        defs: Vec<FieldDef>,
    ) -> Self {
        let mut fields = defs;
        for name in required_fields.iter().chain(optional_fields.iter()) {
            if !fields.iter().any(|f| &f.name == name) {
                fields.push(FieldDef::new(name.clone()));
            }
        }
        for field in &mut fields {
            field.required = required_fields.contains(&field.name);
        }

        Self {
            id,
            name: name.into(),
            description: description.into(),
            fields,
            required_fields,
            optional_fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Authored question for a field, if any.
    pub fn question(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(|f| f.question.as_deref())
    }

    /// Role of a field, inferred from its definition.
    pub fn role_of(&self, name: &str) -> FieldRole {
        match self.field(name) {
            Some(def) => def.role(),
            None => FieldRole::infer(&FieldDef::new(name)),
        }
    }

    /// Fields carrying `role`, in schema order.
    pub fn fields_with_role(&self, role: FieldRole) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(move |f| f.role() == role)
    }

    /// The field that long free-text answers go to.
    pub fn free_text_field(&self) -> Option<&FieldDef> {
        self.fields_with_role(FieldRole::FreeText).next()
    }

    /// Required fields absent or blank in `values`, in question order.
    pub fn missing_fields<'a>(&'a self, values: &FieldValues) -> Vec<&'a str> {
        self.required_fields
            .iter()
            .filter(|name| values.is_blank(name))
            .map(String::as_str)
            .collect()
    }

    /// First unmet required field.
    pub fn next_missing(&self, values: &FieldValues) -> Option<&str> {
        self.required_fields
            .iter()
            .find(|name| values.is_blank(name))
            .map(String::as_str)
    }

    pub fn is_complete(&self, values: &FieldValues) -> bool {
        self.next_missing(values).is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::FormType;

    fn sample() -> FormSchema {
        FormSchema::new(
            FormIdentifier::Hardcoded(FormType::ChangeOfMajor),
            "Sample",
            "",
            vec!["studentName".into(), "studentId".into(), "desiredMajor".into()],
            vec!["reason".into()],
            vec![FieldDef::new("studentName").with_question("Name please?")],
        )
    }

    #[test]
    fn infer_from_name_covers_common_kinds() {
        assert_eq!(FieldType::infer_from_name("email"), FieldType::Email);
        assert_eq!(FieldType::infer_from_name("phone"), FieldType::Phone);
        assert_eq!(FieldType::infer_from_name("expectedGraduationDate"), FieldType::Date);
        assert_eq!(FieldType::infer_from_name("reason"), FieldType::Textarea);
        assert_eq!(FieldType::infer_from_name("honorsProgram"), FieldType::Checkbox);
        assert_eq!(FieldType::infer_from_name("coursesToDrop"), FieldType::List);
        assert_eq!(FieldType::infer_from_name("department"), FieldType::Text);
    }

    #[test]
    fn phone_is_matched_on_whole_words() {
        assert_eq!(FieldType::infer_from_name("phoneNumber"), FieldType::Phone);
        assert_eq!(FieldType::infer_from_name("tel_number"), FieldType::Phone);
        assert_eq!(FieldType::infer_from_name("cellphone"), FieldType::Phone);
        assert_eq!(FieldType::infer_from_name("satelliteCampus"), FieldType::Text);
        assert_eq!(FieldType::infer_from_name("hostelName"), FieldType::Text);
        assert_eq!(FieldType::infer_from_name("hotelName"), FieldType::Text);
    }

    #[test]
    fn declared_type_wins_over_name() {
        let def: FieldDef =
            serde_json::from_str(r#"{"name": "phoneNumber", "type": "text"}"#).unwrap();
        assert_eq!(def.field_type, FieldType::Text);
        assert_eq!(def.role(), FieldRole::Other);
    }

    #[test]
    fn missing_type_is_inferred_from_name() {
        let def: FieldDef = serde_json::from_str(r#"{"name": "contactEmail"}"#).unwrap();
        assert_eq!(def.field_type, FieldType::Email);
        assert!(def.question.is_none());
    }

    #[test]
    fn field_type_accepts_tel_alias() {
        let parsed: FieldType = serde_json::from_str("\"tel\"").unwrap();
        assert_eq!(parsed, FieldType::Phone);
    }

    #[test]
    fn new_synthesises_missing_definitions() {
        let schema = sample();
        assert_eq!(schema.fields.len(), 4);
        assert!(schema.field("desiredMajor").unwrap().required);
        assert!(!schema.field("reason").unwrap().required);
    }

    #[test]
    fn question_returns_authored_text_only() {
        let schema = sample();
        assert_eq!(schema.question("studentName"), Some("Name please?"));
        assert_eq!(schema.question("studentId"), None);
    }

    #[test]
    fn missing_fields_keep_required_order() {
        let schema = sample();
        let values = FieldValues::from_pairs([("studentId", "123")]);
        assert_eq!(schema.missing_fields(&values), vec!["studentName", "desiredMajor"]);
        assert_eq!(schema.next_missing(&values), Some("studentName"));
        assert!(!schema.is_complete(&values));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let schema = sample();
        let values = FieldValues::from_pairs([
            ("studentName", "Ada"),
            ("studentId", "  "),
            ("desiredMajor", "Physics"),
        ]);
        assert_eq!(schema.next_missing(&values), Some("studentId"));
    }

    #[test]
    fn free_text_field_is_first_textarea() {
        let schema = sample();
        assert_eq!(schema.free_text_field().map(|f| f.name.as_str()), Some("reason"));
    }

    #[test]
    fn display_label_falls_back_to_name() {
        let def = FieldDef::new("x").with_label("");
        assert_eq!(def.display_label(), "x");
    }
}
