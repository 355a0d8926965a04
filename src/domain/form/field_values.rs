//! The generic field map a session accumulates.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Returns true if a value counts as "not provided".
///
/// Null, empty or whitespace-only strings and empty arrays are blank.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Field name to value map for one form.
///
/// Values stay as JSON so template forms can carry checkboxes and course
/// lists alongside plain text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValues(BTreeMap<String, Value>);

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from plain string pairs.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns the value as a string slice if it is a JSON string.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    /// True if the field is absent or blank.
    pub fn is_blank(&self, name: &str) -> bool {
        self.0.get(name).map(is_blank).unwrap_or(true)
    }

    /// True if the field is present and non-blank.
    pub fn is_filled(&self, name: &str) -> bool {
        !self.is_blank(name)
    }

    /// Writes `value` only if the slot is currently blank and the new value
    /// is not. Returns whether the write happened.
    pub fn fill_blank(&mut self, name: impl Into<String>, value: Value) -> bool {
        let name = name.into();
        if is_blank(&value) || self.is_filled(&name) {
            return false;
        }
        self.0.insert(name, value);
        true
    }

    /// Copies every non-blank entry of `other` into blank slots of `self`.
    ///
    /// Populated fields are never overwritten, so repeated merges only ever
    /// grow the set of filled fields.
    pub fn merge_missing(&mut self, other: &FieldValues) {
        for (name, value) in &other.0 {
            self.fill_blank(name.clone(), value.clone());
        }
    }

    /// Same as [`merge_missing`](Self::merge_missing) for extraction output.
    pub fn merge_extracted(&mut self, extracted: &BTreeMap<String, String>) {
        for (name, value) in extracted {
            self.fill_blank(name.clone(), Value::String(value.clone()));
        }
    }

    /// Human-readable rendering of a field, or None if blank.
    pub fn display_value(&self, name: &str) -> Option<String> {
        let value = self.0.get(name)?;
        if is_blank(value) {
            return None;
        }
        Some(display(value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of non-blank entries.
    pub fn filled_count(&self) -> usize {
        self.0.values().filter(|v| !is_blank(v)).count()
    }
}

impl From<BTreeMap<String, Value>> for FieldValues {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Array(items) => items.iter().map(display).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
