//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps and error types that the form and dialogue
//! modules build on.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{SessionId, TemplateId};
pub use timestamp::Timestamp;
