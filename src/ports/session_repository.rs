//! Session repository port.
//!
//! Keyed storage of dialogue sessions. Implementations may expire entries;
//! an expired session is indistinguishable from one never stored.

use async_trait::async_trait;

use crate::domain::dialogue::Session;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionStoreError {
    #[error("session store unavailable: {0}")]
    Backend(String),

    #[error("session serialization failed: {0}")]
    Serialization(String),
}

impl From<SessionStoreError> for DomainError {
    fn from(err: SessionStoreError) -> Self {
        DomainError::new(ErrorCode::CacheError, err.to_string())
    }
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads a session. Returns `None` if absent or expired.
    async fn get(&self, id: &SessionId) -> Result<Option<Session>, SessionStoreError>;

    /// Inserts or replaces a session.
    async fn set(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Removes a session. Returns whether one was present.
    async fn delete(&self, id: &SessionId) -> Result<bool, SessionStoreError>;
}
