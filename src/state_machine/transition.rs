//! Pure turn transition function

use super::{CallLimits, CallPhase, Effect, Reply, Session, Turn};
use chrono::{DateTime, Utc};

/// What happens to the stored session after a turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionUpdate {
    /// First turn seen for this call id: store a fresh session
    Create(Session),
    /// Keep the call alive with the mutated session
    Keep(Session),
    /// The call is over: remove the session from the store
    End,
}

/// Result of applying one turn
#[derive(Debug)]
pub struct TransitionResult {
    pub update: SessionUpdate,
    pub reply: Reply,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    fn new(update: SessionUpdate, reply: Reply) -> Self {
        Self {
            update,
            reply,
            effects: vec![],
        }
    }

    fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Pure transition function
///
/// Given the same inputs this always produces the same outputs, with no
/// I/O side effects. Checks run in precedence order: session creation,
/// call duration, silence, then content.
pub fn transition(
    session: Option<&Session>,
    limits: &CallLimits,
    turn: &Turn,
    now: DateTime<Utc>,
) -> TransitionResult {
    // First turn for this call id (or a stale retry after deletion):
    // open a fresh session. Speech in the payload is discarded here.
    let Some(session) = session else {
        let session = Session::new(turn.phone(), now);
        return TransitionResult::new(SessionUpdate::Create(session), Reply::Greeting);
    };

    // Hard stop once the call has outlived its budget, before the turn's
    // speech or silence streak is considered.
    if session.age(now) > limits.max_call_duration {
        return TransitionResult::new(SessionUpdate::End, Reply::TimedOut);
    }

    if turn.is_silent() {
        let silence_count = session.silence_count + 1;
        if silence_count >= limits.max_silence_warnings {
            // The count is not written back; the session is gone.
            return TransitionResult::new(SessionUpdate::End, Reply::TimedOut);
        }
        let mut next = session.clone();
        next.silence_count = silence_count;
        return TransitionResult::new(SessionUpdate::Keep(next), Reply::SilenceReprompt);
    }

    // Non-empty speech: the silence streak is over. The reset happens only
    // here, so an empty turn never reaches the content rules below.
    let mut next = session.clone();
    next.silence_count = 0;

    match next.phase.clone() {
        CallPhase::AwaitingName => {
            next.phase = CallPhase::AwaitingReason {
                name: turn.speech().to_string(),
            };
            TransitionResult::new(SessionUpdate::Keep(next), Reply::ReasonPrompt)
        }
        CallPhase::AwaitingReason { name } => {
            TransitionResult::new(SessionUpdate::End, Reply::Completed)
                .with_effect(Effect::notify(name, turn.speech(), next.phone, now))
        }
    }
}
