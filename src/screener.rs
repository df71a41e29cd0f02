//! Turn-handling runtime for the call screener
//!
//! Owns the session store and the notifier, applies the pure state machine
//! to each inbound turn, and executes the resulting effects.

use crate::notify::{Notification, Notifier};
use crate::state_machine::{transition, CallLimits, Effect, SessionUpdate, Turn};
use crate::store::SessionStore;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

/// How often the background reaper sweeps for abandoned sessions
const REAP_INTERVAL: Duration = Duration::from_secs(60);

/// Abandoned sessions are reclaimed after twice the call budget, so the
/// per-turn duration check stays the path that speaks the timeout message.
const REAP_TTL_FACTOR: u32 = 2;

pub struct CallScreener {
    store: SessionStore,
    notifier: Arc<dyn Notifier>,
    limits: CallLimits,
}

impl CallScreener {
    pub fn new(notifier: Arc<dyn Notifier>, limits: CallLimits) -> Self {
        Self {
            store: SessionStore::new(),
            notifier,
            limits,
        }
    }

    #[allow(dead_code)] // Test access to the live session map
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Process one webhook turn and produce the text to speak back.
    ///
    /// Turns for the same call id serialize on the store's per-call lock;
    /// turns for different ids run concurrently.
    pub async fn handle_turn(&self, call_id: &str, speech: &str, phone: &str) -> String {
        let turn = Turn::new(speech, phone);
        let now = Utc::now();

        let lock = self.store.lock_handle(call_id).await;
        let _guard = lock.lock().await;

        let session = self.store.get(call_id).await;
        let result = transition(session.as_ref(), &self.limits, &turn, now);

        match result.update {
            SessionUpdate::Create(session) => {
                tracing::info!(call_id, phone = %session.phone, "call session opened");
                self.store.insert(call_id, session).await;
            }
            SessionUpdate::Keep(session) => {
                self.store.insert(call_id, session).await;
            }
            SessionUpdate::End => {
                tracing::info!(call_id, "call session closed");
                self.store.delete(call_id).await;
            }
        }

        let mut notified = false;
        for effect in result.effects {
            match effect {
                Effect::Notify(notification) => {
                    notified = self.dispatch(call_id, &notification).await;
                }
            }
        }

        tracing::debug!(call_id, reply = ?result.reply, "turn handled");
        result.reply.text(notified).to_string()
    }

    /// Execute the notify effect, downgrading any failure to a boolean.
    /// The call always ends with a spoken message regardless of outcome.
    async fn dispatch(&self, call_id: &str, notification: &Notification) -> bool {
        match self.notifier.notify(notification).await {
            Ok(()) => {
                tracing::info!(
                    call_id,
                    caller = %notification.caller_name,
                    "call notification sent"
                );
                true
            }
            Err(e) => {
                tracing::error!(call_id, error = %e, "call notification failed");
                false
            }
        }
    }

    /// Start the background sweep that reclaims sessions for calls that
    /// stopped sending turns entirely.
    pub fn spawn_reaper(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let screener = Arc::clone(self);
        tokio::spawn(async move {
            let ttl = screener.limits.max_call_duration * REAP_TTL_FACTOR;
            let mut tick = tokio::time::interval(REAP_INTERVAL);
            loop {
                tick.tick().await;
                let removed = screener.store.remove_expired(Utc::now(), ttl).await;
                if removed > 0 {
                    tracing::info!(removed, "reaped abandoned call sessions");
                }
            }
        })
    }
}
