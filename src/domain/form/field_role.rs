//! Semantic roles of fields.
//!
//! Extraction rules target roles rather than literal field names, so the
//! same rules work for built-in forms and uploaded templates.

use super::schema::{FieldDef, FieldType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    PersonName,
    StudentId,
    Email,
    Phone,
    Advisor,
    FreeText,
    Other,
}

impl FieldRole {
    /// Infers the role of a field from its type and name.
    ///
    /// Email and phone follow the field type alone, which is either declared
    /// or already inferred from the name. Then advisor, person name, student
    /// id and free text are checked by name.
    pub fn infer(def: &FieldDef) -> Self {
        let key: String = def
            .name
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        if def.field_type == FieldType::Email {
            FieldRole::Email
        } else if def.field_type == FieldType::Phone {
            FieldRole::Phone
        } else if key.contains("advisor") {
            FieldRole::Advisor
        } else if matches!(key.as_str(), "name" | "studentname" | "fullname" | "applicantname")
            || key.ends_with("studentname")
        {
            FieldRole::PersonName
        } else if matches!(key.as_str(), "studentid" | "id" | "znumber" | "studentnumber")
            || key.ends_with("studentid")
        {
            FieldRole::StudentId
        } else if key == "reason" || def.field_type == FieldType::Textarea {
            FieldRole::FreeText
        } else {
            FieldRole::Other
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(name: &str) -> FieldRole {
        FieldRole::infer(&FieldDef::new(name))
    }

    #[test]
    fn builtin_field_names_map_to_roles() {
        assert_eq!(role("studentName"), FieldRole::PersonName);
        assert_eq!(role("studentId"), FieldRole::StudentId);
        assert_eq!(role("email"), FieldRole::Email);
        assert_eq!(role("phone"), FieldRole::Phone);
        assert_eq!(role("advisorName"), FieldRole::Advisor);
        assert_eq!(role("reason"), FieldRole::FreeText);
        assert_eq!(role("department"), FieldRole::Other);
    }

    #[test]
    fn snake_case_template_names_are_recognised() {
        assert_eq!(role("student_name"), FieldRole::PersonName);
        assert_eq!(role("student_id"), FieldRole::StudentId);
        assert_eq!(role("contact_email"), FieldRole::Email);
    }

    #[test]
    fn advisor_wins_over_person_name() {
        assert_eq!(role("advisor_name"), FieldRole::Advisor);
    }

    #[test]
    fn names_containing_tel_are_not_phones() {
        assert_eq!(role("satelliteCampus"), FieldRole::Other);
        assert_eq!(role("hostelName"), FieldRole::Other);
        assert_eq!(role("mobile_number"), FieldRole::Phone);
    }

    #[test]
    fn declared_text_type_overrides_phone_name() {
        let def = FieldDef::new("phone").with_type(FieldType::Text);
        assert_eq!(FieldRole::infer(&def), FieldRole::Other);
    }

    #[test]
    fn explicit_type_overrides_name() {
        let def = FieldDef::new("contact").with_type(FieldType::Phone);
        assert_eq!(FieldRole::infer(&def), FieldRole::Phone);

        let def = FieldDef::new("comments").with_type(FieldType::Textarea);
        assert_eq!(FieldRole::infer(&def), FieldRole::FreeText);
    }
}
