//! Built-in form schemas.

use super::questions::hardcoded_question;
use super::{FieldDef, FormIdentifier, FormSchema, FormType};

fn field_lists(form: FormType) -> (&'static [&'static str], &'static [&'static str]) {
    match form {
        FormType::ChangeOfMajor => (
            &[
                "studentName",
                "studentId",
                "currentMajor",
                "desiredMajor",
                "advisorName",
                "department",
                "email",
            ],
            &["phone", "reason"],
        ),
        FormType::GraduationApplication => (
            &[
                "studentName",
                "studentId",
                "expectedGraduationDate",
                "degreeType",
                "major",
                "advisorName",
                "department",
                "email",
            ],
            &["phone", "minor", "honorsProgram", "thesisTitle"],
        ),
        FormType::AddDropCourse => (
            &["studentName", "studentId", "semester", "year", "email"],
            &["phone", "coursesToAdd", "coursesToDrop", "reason", "advisorName"],
        ),
    }
}

/// Returns the schema of a built-in form.
pub fn builtin_schema(form: FormType) -> FormSchema {
    let (required, optional) = field_lists(form);

    let defs = required
        .iter()
        .chain(optional.iter())
        .map(|name| {
            let def = FieldDef::new(*name);
            match hardcoded_question(name, form) {
                Some(q) => def.with_question(q),
                None => def,
            }
        })
        .collect();

    FormSchema::new(
        FormIdentifier::Hardcoded(form),
        form.display_name(),
        form.description(),
        required.iter().map(|s| s.to_string()).collect(),
        optional.iter().map(|s| s.to_string()).collect(),
        defs,
    )
}

/// Returns every built-in schema in catalog order.
pub fn builtin_schemas() -> Vec<FormSchema> {
    FormType::all().iter().map(|f| builtin_schema(*f)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::form::{FieldRole, FieldType};

    #[test]
    fn change_of_major_has_expected_required_order() {
        let schema = builtin_schema(FormType::ChangeOfMajor);
        assert_eq!(
            schema.required_fields,
            vec![
                "studentName",
                "studentId",
                "currentMajor",
                "desiredMajor",
                "advisorName",
                "department",
                "email"
            ]
        );
        assert_eq!(schema.optional_fields, vec!["phone", "reason"]);
        assert_eq!(schema.name, "Change of Major");
    }

    #[test]
    fn graduation_application_types_are_inferred() {
        let schema = builtin_schema(FormType::GraduationApplication);
        assert_eq!(schema.required_fields.len(), 8);
        assert_eq!(
            schema.field("expectedGraduationDate").unwrap().field_type,
            FieldType::Date
        );
        assert_eq!(
            schema.field("honorsProgram").unwrap().field_type,
            FieldType::Checkbox
        );
    }

    #[test]
    fn add_drop_course_lists_courses_as_optional() {
        let schema = builtin_schema(FormType::AddDropCourse);
        assert_eq!(schema.required_fields, vec!["studentName", "studentId", "semester", "year", "email"]);
        assert_eq!(schema.field("coursesToAdd").unwrap().field_type, FieldType::List);
        assert!(!schema.field("advisorName").unwrap().required);
    }

    #[test]
    fn every_builtin_schema_has_a_free_text_field_or_none_required() {
        for schema in builtin_schemas() {
            if let Some(field) = schema.free_text_field() {
                assert_eq!(field.role(), FieldRole::FreeText);
                assert!(!field.required);
            }
        }
    }
}
