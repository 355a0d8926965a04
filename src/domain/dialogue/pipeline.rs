//! The per-turn reason / plan / act / reflect pipeline.
//!
//! REASON is the only phase that suspends and lives in the application
//! layer. [`plan`], [`act`] and [`reflect`] are pure and run in that order;
//! the caller passes REASON's [`Reasoning`] to [`reflect`].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::composer::{completion_message, compose_reply};
use super::extraction::{extract, ExtractionResult};
use crate::domain::form::{FieldValues, FormSchema};

/// Phases of one dialogue turn, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentPhase {
    Reason,
    Plan,
    Act,
    Reflect,
}

impl AgentPhase {
    pub fn all() -> &'static [AgentPhase] {
        &[
            AgentPhase::Reason,
            AgentPhase::Plan,
            AgentPhase::Act,
            AgentPhase::Reflect,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Reason => "reason",
            Self::Plan => "plan",
            Self::Act => "act",
            Self::Reflect => "reflect",
        }
    }
}

impl fmt::Display for AgentPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Output of REASON. Advisory only; nothing downstream branches on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reasoning {
    pub analysis: String,
    pub degraded: bool,
}

impl Reasoning {
    pub fn new(analysis: impl Into<String>) -> Self {
        Self {
            analysis: analysis.into(),
            degraded: false,
        }
    }

    /// Reasoning stand-in when the text-generation call failed.
    pub fn unavailable() -> Self {
        Self {
            analysis: super::prompt::ANALYSIS_UNAVAILABLE.to_string(),
            degraded: true,
        }
    }
}

/// Output of PLAN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// First required field still blank before this turn's extraction.
    pub focus: Option<String>,
}

/// Output of ACT.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub fields: FieldValues,
    pub extracted: ExtractionResult,
    pub missing: Vec<String>,
    pub message: String,
}

/// Result of a whole turn, ready to commit.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub fields: FieldValues,
    pub message: String,
    pub is_complete: bool,
    pub missing: Vec<String>,
    pub extracted: Vec<String>,
    pub analysis: String,
}

/// PLAN: picks the focus field from the pre-extraction working values.
pub fn plan(schema: &FormSchema, working: &FieldValues) -> Plan {
    Plan {
        focus: schema.next_missing(working).map(str::to_string),
    }
}

/// ACT: extracts, merges additively and composes the reply.
pub fn act(schema: &FormSchema, mut working: FieldValues, plan: &Plan, utterance: &str) -> Action {
    let extracted = extract(utterance, &working, plan.focus.as_deref(), schema);
    working.merge_extracted(extracted.as_map());

    let missing: Vec<String> = schema
        .missing_fields(&working)
        .into_iter()
        .map(str::to_string)
        .collect();

    let message = match missing.first() {
        None => completion_message(schema, &working),
        Some(next) => compose_reply(utterance, &extracted, next, schema),
    };

    Action {
        fields: working,
        extracted,
        missing,
        message,
    }
}

/// REFLECT: completion is exactly "no required field is missing".
pub fn reflect(action: Action, reasoning: Reasoning) -> TurnOutcome {
    TurnOutcome {
        is_complete: action.missing.is_empty(),
        extracted: action.extracted.field_names().map(str::to_string).collect(),
        fields: action.fields,
        message: action.message,
        missing: action.missing,
        analysis: reasoning.analysis,
    }
}
