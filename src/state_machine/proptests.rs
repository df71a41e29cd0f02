//! Property-based tests for the call state machine
//!
//! These tests verify the screening invariants hold across all possible
//! turn inputs.

use super::state::*;
use super::transition::*;
use super::*;
use chrono::{DateTime, Duration, Utc};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

fn limits() -> CallLimits {
    CallLimits::default()
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_phase() -> impl Strategy<Value = CallPhase> {
    prop_oneof![
        Just(CallPhase::AwaitingName),
        "[A-Za-z]{1,12}".prop_map(|name| CallPhase::AwaitingReason { name }),
    ]
}

fn arb_session() -> impl Strategy<Value = Session> {
    (arb_phase(), 0u32..2, "[0-9+]{8,13}").prop_map(|(phase, silence_count, phone)| Session {
        started_at: t0(),
        silence_count,
        phone,
        phase,
    })
}

/// Transcripts that trim to empty: silence on the wire
fn arb_silent_speech() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[ \t]{0,4}").unwrap()
}

/// Transcripts guaranteed non-empty after trimming
fn arb_spoken_speech() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z][A-Za-z ]{0,24}").unwrap()
}

fn arb_any_speech() -> impl Strategy<Value = String> {
    prop_oneof![arb_silent_speech(), arb_spoken_speech()]
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Unknown call ids always get the greeting and a fresh session,
    /// whatever the speech field carries.
    #[test]
    fn first_turn_always_greets(speech in arb_any_speech(), phone in "[0-9+]{8,13}") {
        let turn = Turn::new(&speech, &phone);
        let result = transition(None, &limits(), &turn, t0());

        prop_assert_eq!(result.reply, Reply::Greeting);
        prop_assert!(result.effects.is_empty());
        match result.update {
            SessionUpdate::Create(session) => {
                prop_assert_eq!(session.phase, CallPhase::AwaitingName);
                prop_assert_eq!(session.silence_count, 0);
                prop_assert_eq!(session.phone, phone);
            }
            other => prop_assert!(false, "expected Create, got {:?}", other),
        }
    }

    /// Once the call outlives its budget, the next turn ends it no matter
    /// what the turn contains or which phase the call was in.
    #[test]
    fn expired_calls_always_time_out(
        session in arb_session(),
        speech in arb_any_speech(),
        over_by in 1i64..600,
    ) {
        let turn = Turn::new(&speech, &session.phone);
        let late = t0() + Duration::seconds(180 + over_by);
        let result = transition(Some(&session), &limits(), &turn, late);

        prop_assert_eq!(result.reply, Reply::TimedOut);
        prop_assert_eq!(result.update, SessionUpdate::End);
        prop_assert!(result.effects.is_empty());
    }

    /// An empty turn bumps the silence count by exactly one; the call ends
    /// when the count reaches the threshold and re-prompts below it. The
    /// phase never advances on silence.
    #[test]
    fn silence_accounting(session in arb_session(), speech in arb_silent_speech()) {
        let turn = Turn::new(&speech, &session.phone);
        let result = transition(Some(&session), &limits(), &turn, t0());

        let bumped = session.silence_count + 1;
        if bumped >= limits().max_silence_warnings {
            prop_assert_eq!(result.reply, Reply::TimedOut);
            prop_assert_eq!(result.update, SessionUpdate::End);
        } else {
            prop_assert_eq!(result.reply, Reply::SilenceReprompt);
            match result.update {
                SessionUpdate::Keep(next) => {
                    prop_assert_eq!(next.silence_count, bumped);
                    prop_assert_eq!(next.phase, session.phase);
                }
                other => prop_assert!(false, "expected Keep, got {:?}", other),
            }
        }
    }

    /// A non-empty turn on a live call always clears the silence streak
    /// before the content rules run.
    #[test]
    fn speech_resets_silence(session in arb_session(), speech in arb_spoken_speech()) {
        let turn = Turn::new(&speech, &session.phone);
        let result = transition(Some(&session), &limits(), &turn, t0());

        match (&session.phase, result.update) {
            (CallPhase::AwaitingName, SessionUpdate::Keep(next)) => {
                prop_assert_eq!(next.silence_count, 0);
                prop_assert_eq!(
                    next.phase,
                    CallPhase::AwaitingReason { name: speech.trim().to_string() }
                );
            }
            (CallPhase::AwaitingReason { .. }, SessionUpdate::End) => {
                prop_assert_eq!(result.reply, Reply::Completed);
                prop_assert_eq!(result.effects.len(), 1);
            }
            (phase, update) => {
                prop_assert!(false, "unexpected outcome {:?} in phase {:?}", update, phase);
            }
        }
    }

    /// Two consecutive empty turns on a fresh call always hang up on the
    /// second one, never the first.
    #[test]
    fn fresh_call_survives_one_silence_not_two(phone in "[0-9+]{8,13}") {
        let session = Session::new(phone.clone(), t0());
        let silent = Turn::new("", &phone);

        let first = transition(Some(&session), &limits(), &silent, t0());
        prop_assert_eq!(first.reply, Reply::SilenceReprompt);
        let survived = match first.update {
            SessionUpdate::Keep(next) => next,
            other => {
                prop_assert!(false, "expected Keep, got {:?}", other);
                unreachable!()
            }
        };

        let second = transition(Some(&survived), &limits(), &silent, t0());
        prop_assert_eq!(second.reply, Reply::TimedOut);
        prop_assert_eq!(second.update, SessionUpdate::End);
    }
}
