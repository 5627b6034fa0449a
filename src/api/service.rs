use async_trait::async_trait;

use super::ApiError;
use crate::flashcards::{CardId, DeckId, Difficulty, Flashcard};

/// The scheduling side of the flashcard service.
///
/// A study session only needs two things from it: which cards are due, and a
/// place to send ratings. How a rating turns into the next due date is up to
/// the implementation.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Cards of `deck_id` due for review, in the order they should be studied.
    /// An empty list means nothing is due.
    async fn fetch_due_cards(&self, deck_id: DeckId) -> Result<Vec<Flashcard>, ApiError>;

    /// Record a rating for a card
    async fn submit_review(&self, card_id: CardId, difficulty: Difficulty) -> Result<(), ApiError>;
}
