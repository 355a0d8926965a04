//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - text generation for the advisory REASON phase
//! - `SchemaResolver` - form identifier to schema
//! - `SessionRepository` - keyed session storage
//! - `AutoFillProvider` - consent-gated student data
//! - `DeadlineProvider` - submission deadlines

mod ai_provider;
mod auto_fill_provider;
mod deadline_provider;
mod schema_resolver;
mod session_repository;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata, TokenUsage,
};
pub use auto_fill_provider::AutoFillProvider;
pub use deadline_provider::{DeadlineProvider, DeadlineStatus, SOON_THRESHOLD_DAYS};
pub use schema_resolver::{FormKind, FormSummary, SchemaError, SchemaResolver};
pub use session_repository::{SessionRepository, SessionStoreError};
