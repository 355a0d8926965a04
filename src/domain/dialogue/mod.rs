//! Dialogue domain module.
//!
//! Sessions, utterance classification, field extraction, reply composition
//! and the four-phase turn pipeline.

pub mod composer;
mod extraction;
pub mod pipeline;
pub mod prompt;
mod session;
pub mod utterance;

pub use extraction::{extract, ExtractionResult};
pub use pipeline::{AgentPhase, Reasoning, TurnOutcome};
pub use session::{Message, MessageRole, Session};
