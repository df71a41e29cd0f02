//! API request/response types

use serde::{Deserialize, Serialize};

/// Inbound webhook payload, form-encoded by the telephony provider.
///
/// Providers omit fields freely, so everything defaults to empty; the
/// handler enforces which ones are actually required.
#[derive(Debug, Deserialize)]
pub struct ExotelWebhook {
    #[serde(rename = "CallSid", default)]
    pub call_sid: String,
    #[serde(rename = "SpeechResult", default)]
    pub speech_result: String,
    #[serde(rename = "From", default)]
    pub from: String,
}

/// JSON error body for rejected requests
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
