//! Per-session turn serialisation.
//!
//! Two turns on the same session run one after the other; turns on different
//! sessions never wait on each other. Table entries are dropped once no turn
//! holds or awaits them, including waiters cancelled before they got the lock.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::foundation::SessionId;

#[derive(Debug)]
struct Entry {
    lock: Arc<AsyncMutex<()>>,
    /// Turns holding or waiting for `lock`.
    users: usize,
}

type LockTable = Arc<Mutex<HashMap<SessionId, Entry>>>;

#[derive(Debug, Clone, Default)]
pub struct TurnLocks {
    table: LockTable,
}

impl TurnLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other turn for `id` is running.
    pub async fn acquire(&self, id: &SessionId) -> TurnGuard {
        let slot = Slot::join(&self.table, id);
        let guard = Arc::clone(&slot.lock).lock_owned().await;
        TurnGuard {
            _guard: guard,
            _slot: slot,
        }
    }

    /// Sessions with a turn in flight or queued.
    pub fn active(&self) -> usize {
        self.table.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// Held for the duration of one turn.
#[derive(Debug)]
pub struct TurnGuard {
    // released before the slot leaves the table
    _guard: OwnedMutexGuard<()>,
    _slot: Slot,
}

/// One turn's registration in the table, from the start of waiting until
/// the turn ends or the wait is abandoned.
#[derive(Debug)]
struct Slot {
    id: SessionId,
    table: LockTable,
    lock: Arc<AsyncMutex<()>>,
}

impl Slot {
    fn join(table: &LockTable, id: &SessionId) -> Self {
        let mut entries = table.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = entries.entry(id.clone()).or_insert_with(|| Entry {
            lock: Arc::default(),
            users: 0,
        });
        entry.users += 1;
        Self {
            id: id.clone(),
            table: Arc::clone(table),
            lock: Arc::clone(&entry.lock),
        }
    }
}

impl Drop for Slot {
    fn drop(&mut self) {
        let mut entries = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entry) = entries.get_mut(&self.id) {
            entry.users = entry.users.saturating_sub(1);
            if entry.users == 0 {
                entries.remove(&self.id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::task::Poll;
    use std::time::Duration;

    fn id(raw: &str) -> SessionId {
        SessionId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn entry_is_dropped_when_idle() {
        let locks = TurnLocks::new();
        {
            let _guard = locks.acquire(&id("a")).await;
            assert_eq!(locks.active(), 1);
        }
        assert_eq!(locks.active(), 0);
    }

    #[tokio::test]
    async fn same_session_turns_do_not_overlap() {
        let locks = TurnLocks::new();
        let running = Arc::new(AtomicUsize::new(0));
        let max_seen = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..5 {
            let locks = locks.clone();
            let running = Arc::clone(&running);
            let max_seen = Arc::clone(&max_seen);
            handles.push(tokio::spawn(async move {
                let _guard = locks.acquire(&id("shared")).await;
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                max_seen.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                running.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(max_seen.load(Ordering::SeqCst), 1);
        assert_eq!(locks.active(), 0);
    }

    #[tokio::test]
    async fn cancelled_waiter_does_not_leave_entry_behind() {
        let locks = TurnLocks::new();
        let first = locks.acquire(&id("x")).await;

        let waited = tokio::time::timeout(Duration::from_millis(5), locks.acquire(&id("x"))).await;
        assert!(waited.is_err());
        assert_eq!(locks.active(), 1);

        drop(first);
        assert_eq!(locks.active(), 0);
    }

    #[tokio::test]
    async fn waiter_cancelled_after_holder_released_cleans_up() {
        let locks = TurnLocks::new();
        let key = id("x");
        let first = locks.acquire(&key).await;

        let mut waiter = Box::pin(locks.acquire(&key));
        assert!(poll_once(waiter.as_mut()).await.is_none());

        drop(first);
        drop(waiter);
        assert_eq!(locks.active(), 0);

        let again = tokio::time::timeout(Duration::from_millis(100), locks.acquire(&id("x"))).await;
        assert!(again.is_ok());
    }

    /// Polls a future exactly once.
    async fn poll_once<F: Future + Unpin>(mut fut: F) -> Option<F::Output> {
        std::future::poll_fn(|cx| match Pin::new(&mut fut).poll(cx) {
            Poll::Ready(out) => Poll::Ready(Some(out)),
            Poll::Pending => Poll::Ready(None),
        })
        .await
    }

    #[tokio::test]
    async fn different_sessions_do_not_block() {
        let locks = TurnLocks::new();
        let _a = locks.acquire(&id("a")).await;

        let b = tokio::time::timeout(Duration::from_millis(100), locks.acquire(&id("b"))).await;
        assert!(b.is_ok());
        assert_eq!(locks.active(), 2);
    }
}
