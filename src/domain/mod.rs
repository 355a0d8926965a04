//! Domain layer - form schemas, dialogue logic and shared primitives.
//!
//! Nothing in here performs I/O.

pub mod dialogue;
pub mod form;
pub mod foundation;
