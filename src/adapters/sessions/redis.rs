//! Redis-backed session store for multi-instance deployments.
//!
//! Sessions are stored as JSON under `form_assistant:session:{id}` with
//! `SET EX` so Redis expires idle sessions.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;

use crate::domain::dialogue::Session;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionRepository, SessionStoreError};

const KEY_PREFIX: &str = "form_assistant:session";

#[derive(Clone)]
pub struct RedisSessionRepository {
    conn: MultiplexedConnection,
    ttl: Duration,
}

impl RedisSessionRepository {
    pub fn new(conn: MultiplexedConnection, ttl: Duration) -> Self {
        Self { conn, ttl }
    }

    /// Opens a multiplexed connection to `url`.
    pub async fn connect(url: &str, ttl: Duration) -> Result<Self, SessionStoreError> {
        let client = redis::Client::open(url).map_err(backend)?;
        let conn = client
            .get_multiplexed_tokio_connection()
            .await
            .map_err(backend)?;
        Ok(Self::new(conn, ttl))
    }

    fn key(id: &SessionId) -> String {
        session_key(id)
    }
}

fn session_key(id: &SessionId) -> String {
    format!("{}:{}", KEY_PREFIX, id)
}

fn backend(e: redis::RedisError) -> SessionStoreError {
    SessionStoreError::Backend(e.to_string())
}

#[async_trait]
impl SessionRepository for RedisSessionRepository {
    async fn get(&self, id: &SessionId) -> Result<Option<Session>, SessionStoreError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(Self::key(id)).await.map_err(backend)?;

        raw.map(|json| {
            serde_json::from_str(&json).map_err(|e| SessionStoreError::Serialization(e.to_string()))
        })
        .transpose()
    }

    async fn set(&self, session: &Session) -> Result<(), SessionStoreError> {
        let json = serde_json::to_string(session)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;
        let mut conn = self.conn.clone();

        redis::cmd("SET")
            .arg(Self::key(session.id()))
            .arg(json)
            .arg("EX")
            .arg(self.ttl.as_secs().max(1))
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(backend)
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, SessionStoreError> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.del(Self::key(id)).await.map_err(backend)?;
        Ok(removed > 0)
    }
}

impl std::fmt::Debug for RedisSessionRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisSessionRepository")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
