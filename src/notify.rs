//! Notification delivery for screened calls
//!
//! Provides a common interface so the screener never depends on the
//! concrete delivery provider.

mod resend;

pub use resend::{NotifyConfig, ResendNotifier};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Payload assembled once both answers are captured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub caller_name: String,
    pub reason: String,
    pub phone: String,
    /// When the final turn of the call arrived
    pub received_at: DateTime<Utc>,
}

/// Notification delivery error
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notifier disabled: {0}")]
    Disabled(&'static str),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("delivery API returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Delivery seam for the completed-call notification
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one notification. Errors are classified, never retried.
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}
