use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;

use facecards_lib::api::{ApiClient, ApiError, ReviewService};
use facecards_lib::flashcards::{DeckId, Difficulty, Flashcard};
use facecards_lib::study::{
    with_timeout, FetchOutcome, FetchTicket, ReviewOutcome, ReviewTicket, StudySession,
};

/// Where card photos live
pub enum ImageSource {
    Server(Arc<ApiClient>),
    /// Offline decks store the photo's path as its filename
    Local,
}

impl ImageSource {
    pub fn locate(&self, filename: &str) -> String {
        match self {
            Self::Server(client) => client.image_url(filename),
            Self::Local => filename.to_string(),
        }
    }
}

/// A service call that finished on the runtime
enum Completion {
    Fetched(FetchTicket, Result<Vec<Flashcard>, ApiError>),
    Reviewed(ReviewTicket, Result<(), ApiError>),
}

pub struct TuiState {
    pub deck_name: String,
    pub session: StudySession,
    pub images: ImageSource,

    service: Arc<dyn ReviewService>,
    runtime: Handle,
    timeout: Duration,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,

    pub flash_message: Option<String>,
    pub show_help: bool,
    pub quit: bool,
}

impl TuiState {
    pub fn new(
        deck_id: DeckId,
        deck_name: String,
        service: Arc<dyn ReviewService>,
        images: ImageSource,
        runtime: Handle,
        timeout: Duration,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            deck_name,
            session: StudySession::new(deck_id),
            images,
            service,
            runtime,
            timeout,
            tx,
            rx,
            flash_message: None,
            show_help: false,
            quit: false,
        }
    }

    // ==================== Actions ====================

    /// Request the first queue
    pub fn start(&mut self) {
        match self.session.start() {
            Ok(ticket) => self.spawn_fetch(ticket),
            Err(e) => self.flash_message = Some(e.to_string()),
        }
    }

    /// Drop the current queue and fetch a fresh one
    pub fn restart(&mut self) {
        let ticket = self.session.restart();
        self.spawn_fetch(ticket);
    }

    pub fn flip(&mut self) {
        if let Err(e) = self.session.flip() {
            self.flash_message = Some(e.to_string());
        }
    }

    pub fn rate(&mut self, difficulty: Difficulty) {
        match self.session.begin_review(difficulty) {
            Ok(ticket) => self.spawn_review(ticket),
            Err(e) => self.flash_message = Some(e.to_string()),
        }
    }

    // ==================== Completions ====================

    /// Hand finished requests back to the session
    pub fn poll_completions(&mut self) {
        while let Ok(completion) = self.rx.try_recv() {
            match completion {
                Completion::Fetched(ticket, result) => {
                    if let FetchOutcome::Ready { cards } = self.session.finish_fetch(ticket, result) {
                        self.flash_message = Some(format!("{} team members to practice", cards));
                    }
                }
                Completion::Reviewed(ticket, result) => {
                    match self.session.finish_review(ticket, result) {
                        ReviewOutcome::Failed { message } => self.flash_message = Some(message),
                        ReviewOutcome::Advanced { .. }
                        | ReviewOutcome::Completed { .. }
                        | ReviewOutcome::Stale => {}
                    }
                }
            }
        }
    }

    fn spawn_fetch(&self, ticket: FetchTicket) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        let timeout = self.timeout;

        self.runtime.spawn(async move {
            let result = with_timeout(timeout, service.fetch_due_cards(ticket.deck_id())).await;
            // The receiver is gone once the screen has closed
            let _ = tx.send(Completion::Fetched(ticket, result));
        });
    }

    fn spawn_review(&self, ticket: ReviewTicket) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        let timeout = self.timeout;

        self.runtime.spawn(async move {
            let result = with_timeout(
                timeout,
                service.submit_review(ticket.card_id(), ticket.difficulty()),
            )
            .await;
            let _ = tx.send(Completion::Reviewed(ticket, result));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use facecards_lib::flashcards::MemoryReviewService;
    use facecards_lib::identity::ParsedIdentity;
    use facecards_lib::study::SessionPhase;

    fn state_with_cards(runtime: &tokio::runtime::Runtime, n: usize) -> TuiState {
        let service = MemoryReviewService::new();
        let deck = service.create_deck("Team".to_string(), None);
        for i in 0..n {
            service
                .add_card(deck.id, ParsedIdentity::new(format!("Person {}", i), "Dev"), None)
                .unwrap();
        }
        TuiState::new(
            deck.id,
            deck.name,
            Arc::new(service),
            ImageSource::Local,
            runtime.handle().clone(),
            Duration::from_secs(5),
        )
    }

    /// Wait until the pending request has been delivered
    fn settle(state: &mut TuiState) {
        for _ in 0..200 {
            state.poll_completions();
            if !state.session.is_busy() {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("request never completed");
    }

    #[test]
    fn test_study_through_channel() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut state = state_with_cards(&runtime, 2);

        state.start();
        settle(&mut state);
        assert_eq!(state.session.position(), Some((1, 2)));

        state.rate(Difficulty::Easy);
        assert_eq!(
            state.flash_message.as_deref(),
            Some("Flip the card before rating it")
        );

        state.flip();
        state.rate(Difficulty::Easy);
        settle(&mut state);
        assert_eq!(state.session.position(), Some((2, 2)));

        state.flip();
        state.rate(Difficulty::Hard);
        settle(&mut state);
        assert_eq!(state.session.phase(), &SessionPhase::Complete { reviewed: 2 });
    }

    #[test]
    fn test_restart_after_completion_finds_nothing_due() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let mut state = state_with_cards(&runtime, 1);

        state.start();
        settle(&mut state);
        state.flip();
        state.rate(Difficulty::Medium);
        settle(&mut state);

        state.restart();
        settle(&mut state);
        assert_eq!(state.session.phase(), &SessionPhase::Complete { reviewed: 0 });
    }
}
