//! Question wording for form fields.

use super::FormType;

/// Splits a camelCase or snake_case field name into lower-case words.
///
/// `expectedGraduationDate` becomes `expected graduation date`.
pub fn humanize(name: &str) -> String {
    split_words(name).join(" ").to_lowercase()
}

/// Title-cased display label, e.g. `studentId` becomes `Student ID`.
pub fn label_for(name: &str) -> String {
    split_words(name)
        .iter()
        .map(|word| {
            if word.eq_ignore_ascii_case("id") {
                return "ID".to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for c in name.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if c.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
            current.push(c);
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Question generated from a field name when nothing better was authored.
pub fn generated_question(name: &str) -> String {
    let phrase = humanize(name);
    let lower = name.to_lowercase();
    if lower.contains("date") {
        format!("What is the {}?", phrase)
    } else if lower.contains("reason") || lower.contains("description") {
        format!("Please provide {}:", phrase)
    } else {
        format!("What is your {}?", phrase)
    }
}

/// Authored question for a built-in form field.
pub fn hardcoded_question(field: &str, form: FormType) -> Option<&'static str> {
    use FormType::*;

    let question = match (field, form) {
        ("studentName", _) => "What is your full name?",
        ("studentId", _) => "What is your student ID number?",
        ("email", _) => "What is your university email address?",
        ("phone", _) => "What is a good phone number to reach you?",

        ("currentMajor", ChangeOfMajor) => "What is your current major?",
        ("desiredMajor", ChangeOfMajor) => "Which major would you like to change to?",
        ("advisorName", ChangeOfMajor) => "Who is your academic advisor?",
        ("department", ChangeOfMajor) => "Which department offers your new major?",
        ("reason", ChangeOfMajor) => "Why would you like to change your major?",

        ("expectedGraduationDate", GraduationApplication) => {
            "When do you expect to graduate? (for example, May 2026)"
        }
        ("degreeType", GraduationApplication) => {
            "Which degree are you applying for (e.g. Bachelor of Science)?"
        }
        ("major", GraduationApplication) => "What is your major?",
        ("minor", GraduationApplication) => "Do you have a minor? If so, which one?",
        ("advisorName", GraduationApplication) => "Who is your faculty advisor?",
        ("department", GraduationApplication) => "Which department is your major in?",
        ("honorsProgram", GraduationApplication) => "Are you in the honors program?",
        ("thesisTitle", GraduationApplication) => "What is the title of your thesis?",

        ("semester", AddDropCourse) => "Which semester is this for (Fall, Spring or Summer)?",
        ("year", AddDropCourse) => "Which year is that semester in?",
        ("coursesToAdd", AddDropCourse) => "Which courses would you like to add?",
        ("coursesToDrop", AddDropCourse) => "Which courses would you like to drop?",
        ("reason", AddDropCourse) => "What is the reason for this change?",
        ("advisorName", AddDropCourse) => "Who is your advisor?",

        _ => return None,
    };
    Some(question)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn humanize_splits_camel_case() {
        assert_eq!(humanize("expectedGraduationDate"), "expected graduation date");
        assert_eq!(humanize("student_name"), "student name");
        assert_eq!(humanize("email"), "email");
    }

    #[test]
    fn label_for_title_cases_and_uppercases_id() {
        assert_eq!(label_for("studentName"), "Student Name");
        assert_eq!(label_for("studentId"), "Student ID");
        assert_eq!(label_for("coursesToAdd"), "Courses To Add");
    }

    #[test]
    fn generated_question_follows_field_kind() {
        assert_eq!(generated_question("studentName"), "What is your student name?");
        assert_eq!(
            generated_question("expectedGraduationDate"),
            "What is the expected graduation date?"
        );
        assert_eq!(generated_question("reason"), "Please provide reason:");
    }

    #[test]
    fn hardcoded_question_varies_by_form() {
        assert_eq!(
            hardcoded_question("advisorName", FormType::ChangeOfMajor),
            Some("Who is your academic advisor?")
        );
        assert_eq!(
            hardcoded_question("advisorName", FormType::GraduationApplication),
            Some("Who is your faculty advisor?")
        );
        assert_eq!(hardcoded_question("favouriteColour", FormType::AddDropCourse), None);
    }

    #[test]
    fn every_builtin_field_has_a_question() {
        for form in FormType::all() {
            let schema = crate::domain::form::catalog::builtin_schema(*form);
            for field in &schema.fields {
                assert!(
                    hardcoded_question(&field.name, *form).is_some(),
                    "{} on {} has no question",
                    field.name,
                    form
                );
            }
        }
    }
}
