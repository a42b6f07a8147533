//! Session-keyed turn serialization.
//!
//! Every handler that reads, computes and writes back a session holds the
//! session's lock for the whole turn. Waiters are served in arrival order,
//! so turns for one session apply in the order they were sent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as TurnMutex, OwnedMutexGuard};

use crate::domain::foundation::PosterSessionId;

/// Held for the duration of one turn.
pub type SessionTurnGuard = OwnedMutexGuard<()>;

#[derive(Debug, Clone, Default)]
pub struct SessionTurnLocks {
    locks: Arc<Mutex<HashMap<PosterSessionId, Arc<TurnMutex<()>>>>>,
}

impl SessionTurnLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other turn is in flight for `session_id`.
    pub async fn acquire(&self, session_id: PosterSessionId) -> SessionTurnGuard {
        self.lock_for(session_id).lock_owned().await
    }

    /// Takes the lock only if the session is idle.
    pub fn try_acquire(&self, session_id: PosterSessionId) -> Option<SessionTurnGuard> {
        self.lock_for(session_id).try_lock_owned().ok()
    }

    /// Sessions with a turn in flight or waiting.
    pub fn active(&self) -> usize {
        self.locks
            .lock()
            .unwrap()
            .values()
            .filter(|l| Arc::strong_count(l) > 1)
            .count()
    }

    fn lock_for(&self, session_id: PosterSessionId) -> Arc<TurnMutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        // Idle entries are only referenced by the map.
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks.entry(session_id).or_default().clone()
    }
}
