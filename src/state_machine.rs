//! Core call state machine
//!
//! Implements the Elm Architecture pattern with pure turn transitions.

mod effect;
pub mod event;
mod reply;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Turn;
pub use reply::Reply;
pub use state::{CallLimits, CallPhase, Session};
pub use transition::{transition, SessionUpdate, TransitionResult};
