//! In-memory call session store
//!
//! Process-wide mapping from provider call id to live session state, with
//! explicit lifecycle: sessions are created on the first turn and deleted
//! by the screener at the three exit points (completion, timeout, silence
//! exhaustion) or reclaimed by the background reaper.

use crate::state_machine::Session;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// Keyed session registry with per-call mutual exclusion.
///
/// The provider is expected to serialize turns per call, but the store does
/// not rely on that: `lock_handle` hands out a per-call-id mutex so turns
/// for one call serialize while different calls proceed concurrently.
#[derive(Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
    locks: RwLock<HashMap<String, Arc<Mutex<()>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the turn lock for a call id, creating it on first use.
    ///
    /// Lock entries outlive their session: `delete` leaves them in place
    /// so a stale retry serializes on the same mutex as any in-flight
    /// turn, and the reaper prunes entries nobody holds.
    pub async fn lock_handle(&self, call_id: &str) -> Arc<Mutex<()>> {
        {
            let locks = self.locks.read().await;
            if let Some(lock) = locks.get(call_id) {
                return Arc::clone(lock);
            }
        }

        let mut locks = self.locks.write().await;
        Arc::clone(locks.entry(call_id.to_string()).or_default())
    }

    pub async fn get(&self, call_id: &str) -> Option<Session> {
        self.sessions.read().await.get(call_id).cloned()
    }

    /// Store a session, either freshly created or mutated by a turn
    pub async fn insert(&self, call_id: &str, session: Session) {
        self.sessions
            .write()
            .await
            .insert(call_id.to_string(), session);
    }

    /// Remove the session. The per-call lock entry stays behind so late
    /// turns for this id keep serializing; the reaper reclaims it.
    pub async fn delete(&self, call_id: &str) {
        self.sessions.write().await.remove(call_id);
    }

    /// Drop sessions older than `ttl`, returning how many were removed,
    /// then prune lock entries whose session is gone and which no task
    /// currently holds.
    ///
    /// Backstop for calls that simply stop sending turns; the per-turn
    /// duration check remains the path that produces the spoken timeout.
    pub async fn remove_expired(&self, now: DateTime<Utc>, ttl: Duration) -> usize {
        let expired: Vec<String> = {
            let sessions = self.sessions.read().await;
            sessions
                .iter()
                .filter(|(_, session)| session.age(now) > ttl)
                .map(|(call_id, _)| call_id.clone())
                .collect()
        };

        for call_id in &expired {
            self.delete(call_id).await;
        }

        // A strong count above one means a turn still holds the handle;
        // pruning it would let a later turn mint a second lock for the
        // same call id.
        let sessions = self.sessions.read().await;
        self.locks
            .write()
            .await
            .retain(|call_id, lock| sessions.contains_key(call_id) || Arc::strong_count(lock) > 1);

        expired.len()
    }

    #[allow(dead_code)] // API completeness
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    #[allow(dead_code)] // API completeness
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    #[allow(dead_code)] // Test access to lock lifecycle
    pub async fn lock_count(&self) -> usize {
        self.locks.read().await.len()
    }
}
