//! Call session state types

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Hard stop for a single call
const MAX_CALL_DURATION: Duration = Duration::from_secs(180);

/// Empty-speech turns tolerated before hanging up
const MAX_SILENCE_WARNINGS: u32 = 2;

/// Which question the caller is currently being asked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallPhase {
    /// Greeting delivered, waiting for the caller's name
    AwaitingName,
    /// Name captured, waiting for the reason for the call
    AwaitingReason { name: String },
}

/// Live state for one call, keyed by the provider's call id.
///
/// A session exists only between its creation turn and the turn that ends
/// the call; capturing the reason is terminal and never stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Set at creation, immutable
    pub started_at: DateTime<Utc>,
    /// Consecutive empty-speech turns since the last non-empty turn
    pub silence_count: u32,
    /// Caller-supplied phone number, captured at creation
    pub phone: String,
    pub phase: CallPhase,
}

impl Session {
    pub fn new(phone: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            silence_count: 0,
            phone: phone.into(),
            phase: CallPhase::AwaitingName,
        }
    }

    /// Elapsed time since the call started. A `now` before `started_at`
    /// counts as zero age.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.started_at).to_std().unwrap_or(Duration::ZERO)
    }
}

/// Limits applied to every call (immutable configuration)
#[derive(Debug, Clone, Copy)]
pub struct CallLimits {
    pub max_call_duration: Duration,
    pub max_silence_warnings: u32,
}

impl Default for CallLimits {
    fn default() -> Self {
        Self {
            max_call_duration: MAX_CALL_DURATION,
            max_silence_warnings: MAX_SILENCE_WARNINGS,
        }
    }
}
