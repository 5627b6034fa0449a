//! Study sessions over a deck's due cards
//!
//! A [`StudySession`] is the state machine behind one review cycle:
//! `Loading -> Ready -> ... -> Complete`, with `Error` when the queue cannot be
//! fetched. It owns only transient state (position, flip, reviewed count);
//! cards and their schedule belong to the [`ReviewService`](crate::api::ReviewService).

mod session;
mod state;

pub use session::{with_timeout, StudySession};
pub use state::{
    FetchOutcome, FetchTicket, ReviewOutcome, ReviewTicket, SessionError, SessionPhase,
    SessionSummary,
};
