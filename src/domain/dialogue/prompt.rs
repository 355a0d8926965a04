//! Prompt for the advisory REASON phase.

use crate::domain::form::{FieldValues, FormSchema};

/// System instruction sent alongside the reasoning prompt.
pub const REASON_SYSTEM_PROMPT: &str =
    "You are an intelligent assistant helping a student fill out a university form. \
     Answer briefly and factually.";

/// Placeholder analysis used when the text-generation call fails.
pub const ANALYSIS_UNAVAILABLE: &str = "Unable to analyze message";

/// Builds the analysis prompt for one utterance.
pub fn build_reason_prompt(schema: &FormSchema, values: &FieldValues, utterance: &str) -> String {
    let field_list = if schema.required_fields.is_empty() {
        "form fields".to_string()
    } else {
        schema.required_fields.join(", ")
    };
    let current = serde_json::to_string_pretty(values).unwrap_or_else(|_| "{}".to_string());

    format!(
        "You are an intelligent assistant helping a student fill out a \"{name}\" form.\n\n\
         Current form data: {current}\n\n\
         Student's message: \"{utterance}\"\n\n\
         Analyze this message and identify:\n\
         1. What information did the student provide?\n\
         2. What field(s) does this relate to ({field_list})?\n\
         3. Is the information valid and complete?\n\n\
         Provide a brief analysis.",
        name = schema.name,
    )
}
