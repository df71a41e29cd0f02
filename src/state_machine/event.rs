//! Inbound turn events

/// One webhook callback from the telephony provider.
///
/// The transcript is trimmed on construction; an empty transcript after
/// trimming is treated as silence.
#[derive(Debug, Clone)]
pub struct Turn {
    speech: String,
    phone: String,
}

impl Turn {
    pub fn new(speech: &str, phone: &str) -> Self {
        Self {
            speech: speech.trim().to_string(),
            phone: phone.trim().to_string(),
        }
    }

    pub fn speech(&self) -> &str {
        &self.speech
    }

    /// Caller phone number, only consumed at session creation
    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn is_silent(&self) -> bool {
        self.speech.is_empty()
    }
}
