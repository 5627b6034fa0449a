//! Study session controller
//!
//! A session walks the due-card queue of one deck: fetch the queue, flip the
//! current card, rate it, move on. Requests to the review service are split
//! in two halves so the completion is handed back to the session explicitly:
//!
//! ```text
//! start()/restart() -> FetchTicket  --(service)-->  finish_fetch(ticket, result)
//! begin_review(d)   -> ReviewTicket --(service)-->  finish_review(ticket, result)
//! ```
//!
//! Only one request may be in flight. Tickets issued before a `restart` are
//! stale and their results are dropped, so an abandoned request can never move
//! the session. The index only advances after the service acknowledged a
//! rating.

use std::future::Future;
use std::time::Duration;

use super::state::*;
use crate::api::{ApiError, ReviewService};
use crate::flashcards::{CardId, DeckId, Difficulty, Flashcard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    Fetch,
    Review { card_id: CardId },
}

#[derive(Debug)]
pub struct StudySession {
    deck_id: DeckId,
    phase: SessionPhase,
    generation: u64,
    pending: Option<Pending>,
    last_error: Option<String>,
}

impl StudySession {
    /// A session for `deck_id`, loading but with nothing requested yet
    pub fn new(deck_id: DeckId) -> Self {
        Self {
            deck_id,
            phase: SessionPhase::Loading,
            generation: 0,
            pending: None,
            last_error: None,
        }
    }

    pub fn deck_id(&self) -> DeckId {
        self.deck_id
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    /// Whether a request is waiting for its completion
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    /// Message of the last failed rating, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ==================== Queue ====================

    /// Request the due-card queue for a freshly created session
    pub fn start(&mut self) -> Result<FetchTicket, SessionError> {
        if self.pending.is_some() {
            return Err(SessionError::RequestInFlight);
        }
        if self.phase != SessionPhase::Loading {
            return Err(SessionError::AlreadyStarted);
        }

        log::info!("Study session for deck {}: fetching due cards", self.deck_id);
        self.pending = Some(Pending::Fetch);
        Ok(self.fetch_ticket())
    }

    /// Drop the current queue and request a fresh one.
    ///
    /// Allowed in any phase. Whatever is in flight becomes stale.
    pub fn restart(&mut self) -> FetchTicket {
        self.generation += 1;
        self.phase = SessionPhase::Loading;
        self.pending = Some(Pending::Fetch);
        self.last_error = None;

        log::info!("Study session for deck {}: restarting", self.deck_id);
        self.fetch_ticket()
    }

    fn fetch_ticket(&self) -> FetchTicket {
        FetchTicket {
            deck_id: self.deck_id,
            generation: self.generation,
        }
    }

    /// Deliver the result of a queue fetch
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Flashcard>, ApiError>,
    ) -> FetchOutcome {
        if ticket.generation != self.generation || self.pending != Some(Pending::Fetch) {
            log::debug!("Ignoring stale fetch for deck {}", ticket.deck_id);
            return FetchOutcome::Stale;
        }
        self.pending = None;

        match result {
            Ok(queue) if queue.is_empty() => {
                log::info!("Deck {}: nothing due", self.deck_id);
                self.phase = SessionPhase::Complete { reviewed: 0 };
                FetchOutcome::NothingDue
            }
            Ok(queue) => {
                let cards = queue.len();
                log::info!("Deck {}: {} cards due", self.deck_id, cards);
                self.phase = SessionPhase::Ready {
                    queue,
                    index: 0,
                    flipped: false,
                    reviewed: 0,
                };
                FetchOutcome::Ready { cards }
            }
            Err(e) => {
                log::warn!("Deck {}: fetching due cards failed: {}", self.deck_id, e);
                let message = format!("Failed to fetch cards: {}", e);
                self.phase = SessionPhase::Error {
                    message: message.clone(),
                };
                FetchOutcome::Failed { message }
            }
        }
    }

    // ==================== Current card ====================

    /// Toggle between photo and answer. Returns whether the answer now shows.
    pub fn flip(&mut self) -> Result<bool, SessionError> {
        if self.pending.is_some() {
            return Err(SessionError::RequestInFlight);
        }

        match &mut self.phase {
            SessionPhase::Ready { flipped, .. } => {
                *flipped = !*flipped;
                Ok(*flipped)
            }
            other => Err(SessionError::NotReady {
                phase: other.name(),
            }),
        }
    }

    /// Rate the current card. It must be flipped, and nothing may be in flight.
    pub fn begin_review(&mut self, difficulty: Difficulty) -> Result<ReviewTicket, SessionError> {
        if self.pending.is_some() {
            return Err(SessionError::RequestInFlight);
        }

        let card_id = match &self.phase {
            SessionPhase::Ready {
                queue,
                index,
                flipped,
                ..
            } => {
                if !*flipped {
                    return Err(SessionError::NotRevealed);
                }
                queue[*index].id
            }
            other => {
                return Err(SessionError::NotReady {
                    phase: other.name(),
                })
            }
        };

        self.pending = Some(Pending::Review { card_id });
        Ok(ReviewTicket {
            card_id,
            difficulty,
            generation: self.generation,
        })
    }

    /// Deliver the service's answer to a rating
    pub fn finish_review(
        &mut self,
        ticket: ReviewTicket,
        result: Result<(), ApiError>,
    ) -> ReviewOutcome {
        let expected = Some(Pending::Review {
            card_id: ticket.card_id,
        });
        if ticket.generation != self.generation || self.pending != expected {
            log::debug!("Ignoring stale review of card {}", ticket.card_id);
            return ReviewOutcome::Stale;
        }
        self.pending = None;

        if let Err(e) = result {
            log::warn!("Review of card {} failed: {}", ticket.card_id, e);
            let message = format!("Failed to save review: {}", e);
            self.last_error = Some(message.clone());
            return ReviewOutcome::Failed { message };
        }
        self.last_error = None;

        let SessionPhase::Ready {
            queue,
            index,
            flipped,
            reviewed,
        } = &mut self.phase
        else {
            // A pending review is only ever issued from Ready
            return ReviewOutcome::Stale;
        };

        *reviewed += 1;
        if *index + 1 >= queue.len() {
            let reviewed = *reviewed;
            log::info!(
                "Study session for deck {} complete: {} reviewed",
                self.deck_id,
                reviewed
            );
            self.phase = SessionPhase::Complete { reviewed };
            ReviewOutcome::Completed { reviewed }
        } else {
            *index += 1;
            *flipped = false;
            ReviewOutcome::Advanced { index: *index }
        }
    }

    // ==================== Reads ====================

    pub fn current_card(&self) -> Option<&Flashcard> {
        match &self.phase {
            SessionPhase::Ready { queue, index, .. } => queue.get(*index),
            _ => None,
        }
    }

    pub fn is_flipped(&self) -> bool {
        matches!(self.phase, SessionPhase::Ready { flipped: true, .. })
    }

    /// 1-based position of the current card and the queue length
    pub fn position(&self) -> Option<(usize, usize)> {
        match &self.phase {
            SessionPhase::Ready { queue, index, .. } if !queue.is_empty() => {
                Some((index + 1, queue.len()))
            }
            _ => None,
        }
    }

    /// `(index + 1) / len` while a non-empty queue is being walked
    pub fn progress_fraction(&self) -> Option<f64> {
        self.position()
            .map(|(current, total)| current as f64 / total as f64)
    }

    pub fn reviewed_count(&self) -> usize {
        match self.phase {
            SessionPhase::Ready { reviewed, .. } | SessionPhase::Complete { reviewed } => reviewed,
            _ => 0,
        }
    }

    pub fn summary(&self) -> Option<SessionSummary> {
        match self.phase {
            SessionPhase::Complete { reviewed } => Some(SessionSummary {
                deck_id: self.deck_id,
                reviewed,
            }),
            _ => None,
        }
    }

    // ==================== Drivers ====================

    /// Fetch the queue of a new session from `service`
    pub async fn load(
        &mut self,
        service: &dyn ReviewService,
        timeout: Duration,
    ) -> Result<FetchOutcome, SessionError> {
        let ticket = self.start()?;
        let result = with_timeout(timeout, service.fetch_due_cards(ticket.deck_id())).await;
        Ok(self.finish_fetch(ticket, result))
    }

    /// Restart and fetch a fresh queue from `service`
    pub async fn reload(&mut self, service: &dyn ReviewService, timeout: Duration) -> FetchOutcome {
        let ticket = self.restart();
        let result = with_timeout(timeout, service.fetch_due_cards(ticket.deck_id())).await;
        self.finish_fetch(ticket, result)
    }

    /// Rate the current card through `service`
    pub async fn rate(
        &mut self,
        service: &dyn ReviewService,
        difficulty: Difficulty,
        timeout: Duration,
    ) -> Result<ReviewOutcome, SessionError> {
        let ticket = self.begin_review(difficulty)?;
        let result = with_timeout(
            timeout,
            service.submit_review(ticket.card_id(), ticket.difficulty()),
        )
        .await;
        Ok(self.finish_review(ticket, result))
    }
}

/// Bound a service call; running out of time counts as a failed call
pub async fn with_timeout<T, F>(limit: Duration, call: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(ApiError::Timeout(limit)),
    }
}
