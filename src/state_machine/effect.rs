//! Effects produced by turn transitions

use crate::notify::Notification;
use chrono::{DateTime, Utc};

/// Effects to be executed after a turn transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Dispatch the caller notification once both answers are captured
    Notify(Notification),
}

impl Effect {
    pub fn notify(
        caller_name: impl Into<String>,
        reason: impl Into<String>,
        phone: impl Into<String>,
        received_at: DateTime<Utc>,
    ) -> Self {
        Effect::Notify(Notification {
            caller_name: caller_name.into(),
            reason: reason.into(),
            phone: phone.into(),
            received_at,
        })
    }
}
