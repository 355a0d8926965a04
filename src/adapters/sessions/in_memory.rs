//! In-memory session store with TTL and LRU eviction.
//!
//! Suitable for tests and single-instance deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::dialogue::Session;
use crate::domain::foundation::SessionId;
use crate::ports::{SessionRepository, SessionStoreError};

#[derive(Debug, Clone)]
struct Entry {
    session: Session,
    expires_at: Instant,
    last_used: u64,
}

#[derive(Debug, Default)]
struct Store {
    entries: HashMap<SessionId, Entry>,
    clock: u64,
}

impl Store {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, e| e.expires_at > now);
        before - self.entries.len()
    }

    fn evict_least_recent(&mut self) -> Option<SessionId> {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, e)| e.last_used)
            .map(|(id, _)| id.clone())?;
        self.entries.remove(&oldest);
        Some(oldest)
    }
}

/// Session repository held in process memory.
///
/// Expired entries are invisible to `get` and purged on write. When the store
/// is full the least recently used session is evicted.
#[derive(Debug, Clone)]
pub struct InMemorySessionRepository {
    store: Arc<RwLock<Store>>,
    ttl: Duration,
    max_sessions: usize,
}

impl InMemorySessionRepository {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::default())),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    /// Live (unexpired) session count.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.store
            .read()
            .await
            .entries
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    pub async fn clear(&self) {
        self.store.write().await.entries.clear();
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new(Duration::from_secs(60 * 60), 10_000)
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn get(&self, id: &SessionId) -> Result<Option<Session>, SessionStoreError> {
        let now = Instant::now();
        let mut store = self.store.write().await;
        let tick = store.tick();

        let expired = match store.entries.get_mut(id) {
            Some(entry) if entry.expires_at > now => {
                entry.last_used = tick;
                return Ok(Some(entry.session.clone()));
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            store.entries.remove(id);
        }
        Ok(None)
    }

    async fn set(&self, session: &Session) -> Result<(), SessionStoreError> {
        let now = Instant::now();
        let mut store = self.store.write().await;
        let tick = store.tick();

        let purged = store.purge_expired(now);
        if purged > 0 {
            tracing::debug!(purged, "expired sessions purged");
        }

        if !store.entries.contains_key(session.id()) {
            while store.entries.len() >= self.max_sessions {
                match store.evict_least_recent() {
                    Some(evicted) => tracing::debug!(session_id = %evicted, "session evicted"),
                    None => break,
                }
            }
        }

        store.entries.insert(
            session.id().clone(),
            Entry {
                session: session.clone(),
                expires_at: now + self.ttl,
                last_used: tick,
            },
        );
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, SessionStoreError> {
        Ok(self.store.write().await.entries.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(id: &str) -> Session {
        Session::new(SessionId::new(id).unwrap(), None)
    }

    fn id(raw: &str) -> SessionId {
        SessionId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn set_then_get_returns_session() {
        let repo = InMemorySessionRepository::default();
        repo.set(&session("a")).await.unwrap();

        let found = repo.get(&id("a")).await.unwrap().unwrap();
        assert_eq!(found.id(), &id("a"));
    }

    #[tokio::test]
    async fn unknown_session_is_none() {
        let repo = InMemorySessionRepository::default();
        assert!(repo.get(&id("missing")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_reports_presence() {
        let repo = InMemorySessionRepository::default();
        repo.set(&session("a")).await.unwrap();

        assert!(repo.delete(&id("a")).await.unwrap());
        assert!(!repo.delete(&id("a")).await.unwrap());
        assert!(repo.get(&id("a")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_sessions_are_invisible() {
        let repo = InMemorySessionRepository::new(Duration::from_millis(20), 10);
        repo.set(&session("a")).await.unwrap();

        tokio::time::sleep(Duration::from_millis(40)).await;

        assert!(repo.get(&id("a")).await.unwrap().is_none());
        assert_eq!(repo.len().await, 0);
    }

    #[tokio::test]
    async fn full_store_evicts_least_recently_used() {
        let repo = InMemorySessionRepository::new(Duration::from_secs(60), 2);
        repo.set(&session("a")).await.unwrap();
        repo.set(&session("b")).await.unwrap();

        // touch "a" so "b" becomes the oldest
        repo.get(&id("a")).await.unwrap();
        repo.set(&session("c")).await.unwrap();

        assert!(repo.get(&id("a")).await.unwrap().is_some());
        assert!(repo.get(&id("b")).await.unwrap().is_none());
        assert!(repo.get(&id("c")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn overwriting_existing_session_does_not_evict() {
        let repo = InMemorySessionRepository::new(Duration::from_secs(60), 2);
        repo.set(&session("a")).await.unwrap();
        repo.set(&session("b")).await.unwrap();
        repo.set(&session("a")).await.unwrap();

        assert_eq!(repo.len().await, 2);
    }
}
