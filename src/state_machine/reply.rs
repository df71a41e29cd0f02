//! Spoken replies returned to the provider

const GREETING: &str = "Hello, you have reached Mr. Anmol's assistant. May I know your name?";

const SILENCE_REPROMPT: &str = "I could not hear you. Please respond.";

const REASON_PROMPT: &str =
    "Thank you. What is the work or reason for which you are calling Mr. Anmol?";

const TIMED_OUT: &str = "No response detected. Ending the call now. Goodbye.";

const COMPLETED_SENT: &str = "Thank you for calling. If the matter is relevant, \
     Mr. Anmol will reach out to you. Goodbye. (Email Sent)";

const COMPLETED_FAILED: &str = "Thank you for calling. If the matter is relevant, \
     Mr. Anmol will reach out to you. Goodbye. (Email Failed - Check Logs)";

/// Reply category for one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// First turn for a call id: greet and ask for the name
    Greeting,
    /// One empty turn tolerated: ask the caller to repeat
    SilenceReprompt,
    /// Name captured: ask for the reason
    ReasonPrompt,
    /// Call exceeded its duration budget or the caller stayed silent
    TimedOut,
    /// Both answers captured; wording depends on whether the notification
    /// went out
    Completed,
}

impl Reply {
    /// The literal text spoken to the caller. `notified` only affects the
    /// wording of [`Reply::Completed`].
    pub fn text(self, notified: bool) -> &'static str {
        match self {
            Reply::Greeting => GREETING,
            Reply::SilenceReprompt => SILENCE_REPROMPT,
            Reply::ReasonPrompt => REASON_PROMPT,
            Reply::TimedOut => TIMED_OUT,
            Reply::Completed => {
                if notified {
                    COMPLETED_SENT
                } else {
                    COMPLETED_FAILED
                }
            }
        }
    }
}
