//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - Text generation (OpenAI, mock, disabled)
//! - `forms` - Built-in forms and the template catalog
//! - `students` - Consent-gated student directory for auto-fill
//! - `deadlines` - Per-form deadline calendar
//! - `sessions` - Session stores (in-memory, Redis)
//! - `http` - Axum routes

pub mod ai;
pub mod deadlines;
pub mod forms;
pub mod http;
pub mod sessions;
pub mod students;
