//! Study session states, request tickets and outcomes

use serde::Serialize;
use thiserror::Error;

use crate::flashcards::{CardId, DeckId, Difficulty, Flashcard};

/// Where a study session is in its review cycle
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPhase {
    /// Waiting for the due-card queue
    Loading,
    /// Walking the queue
    Ready {
        queue: Vec<Flashcard>,
        index: usize,
        flipped: bool,
        reviewed: usize,
    },
    /// Every card has been rated, or nothing was due
    Complete { reviewed: usize },
    /// The queue could not be fetched
    Error { message: String },
}

impl SessionPhase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready { .. } => "ready",
            Self::Complete { .. } => "complete",
            Self::Error { .. } => "error",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("No card to act on while the session is {phase}")]
    NotReady { phase: &'static str },

    #[error("Flip the card before rating it")]
    NotRevealed,

    #[error("A request is already in flight")]
    RequestInFlight,

    #[error("The queue has already been requested; use restart")]
    AlreadyStarted,
}

/// Proof that a queue fetch was requested. Hand it back with the result.
#[derive(Debug)]
#[must_use = "pass the ticket to finish_fetch once the request completes"]
pub struct FetchTicket {
    pub(super) deck_id: DeckId,
    pub(super) generation: u64,
}

impl FetchTicket {
    pub fn deck_id(&self) -> DeckId {
        self.deck_id
    }
}

/// Proof that a rating was handed to the review service
#[derive(Debug)]
#[must_use = "pass the ticket to finish_review once the request completes"]
pub struct ReviewTicket {
    pub(super) card_id: CardId,
    pub(super) difficulty: Difficulty,
    pub(super) generation: u64,
}

impl ReviewTicket {
    pub fn card_id(&self) -> CardId {
        self.card_id
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Ready { cards: usize },
    NothingDue,
    Failed { message: String },
    /// The session moved on before the response arrived
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    /// Moved to the card at `index`
    Advanced { index: usize },
    Completed { reviewed: usize },
    /// Nothing changed; the same card can be rated again
    Failed { message: String },
    Stale,
}

/// What is left of a session once it completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub deck_id: DeckId,
    pub reviewed: usize,
}

impl SessionSummary {
    pub fn message(&self) -> String {
        match self.reviewed {
            0 => "No team members are due for review right now.".to_string(),
            1 => "You've practiced 1 team member in this session.".to_string(),
            n => format!("You've practiced {} team members in this session.", n),
        }
    }
}
