//! Reply wording.
//!
//! Pure functions from the turn's utterance, extraction result and next
//! field to the text the user sees.

use std::fmt::Write;

use super::extraction::ExtractionResult;
use super::utterance::{classify, Tone};
use crate::domain::form::{humanize, FieldRole, FieldValues, FormSchema, FormType};

const MORE_INFO: &str = "Hmm, I need a bit more information to complete your form. ";

/// Acknowledgment for an utterance that produced no field values.
pub fn tone_acknowledgment(tone: Tone) -> &'static str {
    match tone {
        Tone::Greeting => "Hello! Nice to meet you. ",
        Tone::Thanks => "You're welcome! Happy to help. ",
        Tone::SmallTalk => "I'm doing great, thanks for asking! ",
        Tone::Joke => "Haha, I appreciate your energy! ",
        Tone::Confusion => "No worries at all! I'm here to help make this easy for you. ",
        Tone::Short => "Got it! ",
        Tone::Generic => "I hear you! ",
    }
}

/// Acknowledgment for newly extracted values.
///
/// One phrase, chosen by fixed priority: the major being changed to, then
/// the person's name, the id, the current major, email and advisor.
pub fn extraction_acknowledgment(extracted: &ExtractionResult, schema: &FormSchema) -> String {
    let with_role = |role: FieldRole| {
        extracted
            .field_names()
            .find(|name| schema.role_of(name) == role)
            .and_then(|name| extracted.get(name))
    };

    if let Some(major) = extracted.get("desiredMajor") {
        format!("Great choice! {} sounds like an excellent program. ", major)
    } else if let Some(name) = with_role(FieldRole::PersonName) {
        format!("Nice to meet you, {}! ", name)
    } else if with_role(FieldRole::StudentId).is_some() {
        "Perfect, got your ID! ".to_string()
    } else if let Some(major) = extracted.get("currentMajor") {
        format!("Got it, so you're currently in {}. ", major)
    } else if with_role(FieldRole::Email).is_some() {
        "Awesome, I'll use that email to contact you. ".to_string()
    } else if let Some(advisor) = with_role(FieldRole::Advisor) {
        format!("Great, {} is your advisor. ", advisor)
    } else {
        "Perfect, got that information! ".to_string()
    }
}

/// Question asking for `field`.
pub fn next_question(field: &str, schema: &FormSchema) -> String {
    match schema.question(field) {
        Some(q) if !q.trim().is_empty() => q.to_string(),
        _ => format!("Could you please provide {}?", humanize(field)),
    }
}

/// Acknowledgment followed by the question for `next_field`.
///
/// An unremarkable utterance that yielded nothing gets an explicit nudge
/// for more information.
pub fn compose_reply(
    utterance: &str,
    extracted: &ExtractionResult,
    next_field: &str,
    schema: &FormSchema,
) -> String {
    let question = next_question(next_field, schema);
    if extracted.is_empty() {
        let tone = classify(utterance);
        let ack = tone_acknowledgment(tone);
        if tone == Tone::Generic {
            return format!("{}{}{}", ack, MORE_INFO, question);
        }
        return format!("{}{}", ack, question);
    }
    format!("{}{}", extraction_acknowledgment(extracted, schema), question)
}

/// Summary sent when every required field is filled.
pub fn completion_message(schema: &FormSchema, values: &FieldValues) -> String {
    let mut out = format!(
        "Perfect! I have all the information I need for your {}.\n\n",
        schema.name
    );
    for field in &schema.fields {
        if let Some(value) = values.display_value(&field.name) {
            let _ = writeln!(out, "✓ {}: {}", field.display_label(), value);
        }
    }
    out.push_str(
        "\nYou can now:\n\
         • Click \"Download PDF\" to get your filled form\n\
         • Click \"Generate Email\" to create a submission email",
    );
    out
}

/// Greeting for a new session on a known form.
pub fn welcome_message(schema: &FormSchema, deadline_status: Option<&str>) -> String {
    let mut out = format!(
        "Hello! I'm your form assistant. I'll help you complete your {}.\n\n",
        schema.name
    );
    if let Some(status) = deadline_status {
        let _ = write!(out, "{}\n\n", status);
    }
    match schema.required_fields.first() {
        Some(first) => {
            let _ = write!(out, "Let's get started! {}", next_question(first, schema));
        }
        None => out.push_str("This form has no required fields."),
    }
    out
}

/// Prompt listing the forms a user can pick from.
pub fn choose_form_message(templates: &[(String, String)]) -> String {
    let mut out = String::from(
        "Hello! I'm your form assistant. Which form would you like to fill out? \
         Reply with the code in parentheses or pick one from the form selector.\n\n",
    );
    for form in FormType::all() {
        let _ = writeln!(out, "• {} ({}): {}", form.display_name(), form.slug(), form.description());
    }
    for (id, name) in templates {
        let _ = writeln!(out, "• {} ({})", name, id);
    }
    out.trim_end().to_string()
}

/// Reply when the requested form cannot be found.
pub fn form_not_found_message(identifier: &str) -> String {
    format!(
        "Sorry, I couldn't find a form called \"{}\". Please choose one of the available forms and try again.",
        identifier
    )
}
