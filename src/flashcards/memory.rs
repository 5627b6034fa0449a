//! In-process review service
//!
//! Keeps decks and cards in memory and schedules reviews with the reference
//! scheduler. Offline study sessions run against it, built from a folder of
//! photos named after the people in them.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use walkdir::WalkDir;

use super::algorithm::calculate_next_review;
use super::models::*;
use crate::api::{ApiError, ReviewService};
use crate::identity::{ImportPreview, ParsedIdentity};

/// Cards per study session, matching the service's default
pub const DEFAULT_STUDY_LIMIT: usize = 10;

#[derive(Default)]
struct Inner {
    decks: Vec<Deck>,
    cards: Vec<Flashcard>,
    next_deck_id: DeckId,
    next_card_id: CardId,
}

pub struct MemoryReviewService {
    inner: Mutex<Inner>,
    study_limit: usize,
}

impl Default for MemoryReviewService {
    fn default() -> Self {
        Self::new()
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

impl MemoryReviewService {
    pub fn new() -> Self {
        Self::with_study_limit(DEFAULT_STUDY_LIMIT)
    }

    pub fn with_study_limit(study_limit: usize) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            study_limit,
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Build a single deck from the photos in `dir`, sorted by file name.
    ///
    /// Files that are not images, or whose name yields no person, are skipped.
    pub fn from_directory(dir: &Path) -> Result<(Self, DeckId), ApiError> {
        let mut paths: Vec<PathBuf> = Vec::new();
        let walker = WalkDir::new(dir)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // A broken link inside the folder only loses that photo
                Err(e) if e.depth() > 0 => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
                Err(e) => return Err(ApiError::Io(e.into())),
            };
            if entry.depth() == 0 {
                continue;
            }
            if entry.file_type().is_file() {
                paths.push(entry.into_path());
            } else {
                log::debug!("Skipping {}: not a file", entry.path().display());
            }
        }

        let preview = ImportPreview::from_paths(&paths);
        for skipped in preview.rejected() {
            log::warn!(
                "Skipping {}: {}",
                skipped.file_name,
                skipped.issue.map(|i| i.describe()).unwrap_or_default()
            );
        }

        let service = Self::new();
        let deck_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Offline".to_string());
        let deck = service.create_deck(deck_name, Some(dir.display().to_string()));

        for entry in preview.accepted() {
            service.add_card(
                deck.id,
                entry.identity.clone(),
                Some(entry.path.display().to_string()),
            )?;
        }

        log::info!(
            "Built offline deck '{}' with {} cards",
            deck.name,
            service.list_cards(deck.id).len()
        );
        Ok((service, deck.id))
    }

    // ==================== Deck Operations ====================

    pub fn create_deck(&self, name: String, description: Option<String>) -> Deck {
        let mut inner = self.inner();
        inner.next_deck_id += 1;
        let deck = Deck {
            id: inner.next_deck_id,
            name,
            description,
            created_at: now(),
            card_count: 0,
        };
        inner.decks.push(deck.clone());
        deck
    }

    pub fn list_decks(&self) -> Vec<Deck> {
        self.inner().decks.clone()
    }

    // ==================== Card Operations ====================

    /// Add a card that is due immediately
    pub fn add_card(
        &self,
        deck_id: DeckId,
        identity: ParsedIdentity,
        image_filename: Option<String>,
    ) -> Result<Flashcard, ApiError> {
        let mut inner = self.inner();
        let deck = inner
            .decks
            .iter_mut()
            .find(|d| d.id == deck_id)
            .ok_or_else(|| ApiError::NotFound(format!("deck {}", deck_id)))?;
        deck.card_count += 1;

        inner.next_card_id += 1;
        let card = Flashcard {
            id: inner.next_card_id,
            deck_id,
            front: None,
            back: None,
            person_name: identity.name,
            person_role: identity.role,
            image_filename,
            difficulty: 1,
            last_reviewed: None,
            next_review: Some(now()),
            review_count: 0,
        };
        inner.cards.push(card.clone());
        Ok(card)
    }

    pub fn list_cards(&self, deck_id: DeckId) -> Vec<Flashcard> {
        self.inner()
            .cards
            .iter()
            .filter(|c| c.deck_id == deck_id)
            .cloned()
            .collect()
    }

    pub fn get_card(&self, card_id: CardId) -> Option<Flashcard> {
        self.inner().cards.iter().find(|c| c.id == card_id).cloned()
    }
}

#[async_trait]
impl ReviewService for MemoryReviewService {
    async fn fetch_due_cards(&self, deck_id: DeckId) -> Result<Vec<Flashcard>, ApiError> {
        let inner = self.inner();
        if !inner.decks.iter().any(|d| d.id == deck_id) {
            return Err(ApiError::NotFound(format!("deck {}", deck_id)));
        }

        let now = now();
        Ok(inner
            .cards
            .iter()
            .filter(|c| c.deck_id == deck_id)
            .filter(|c| c.next_review.map_or(true, |due| due <= now))
            .take(self.study_limit)
            .cloned()
            .collect())
    }

    async fn submit_review(&self, card_id: CardId, difficulty: Difficulty) -> Result<(), ApiError> {
        let mut inner = self.inner();
        let card = inner
            .cards
            .iter_mut()
            .find(|c| c.id == card_id)
            .ok_or_else(|| ApiError::NotFound(format!("card {}", card_id)))?;

        let now = now();
        card.difficulty = difficulty.value() as i32;
        card.last_reviewed = Some(now);
        card.review_count += 1;
        card.next_review = Some(calculate_next_review(difficulty, card.review_count, now));

        log::debug!(
            "Card {} rated {}, next review {:?}",
            card_id,
            difficulty,
            card.next_review
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service_with_cards(n: usize) -> (MemoryReviewService, DeckId) {
        let service = MemoryReviewService::new();
        let deck = service.create_deck("Team".to_string(), None);
        for i in 0..n {
            service
                .add_card(deck.id, ParsedIdentity::new(format!("Person {}", i), "Dev"), None)
                .unwrap();
        }
        (service, deck.id)
    }

    #[tokio::test]
    async fn test_new_cards_are_due_in_order() {
        let (service, deck_id) = service_with_cards(3);

        let due = service.fetch_due_cards(deck_id).await.unwrap();
        let names: Vec<&str> = due.iter().map(|c| c.person_name.as_str()).collect();
        assert_eq!(names, vec!["Person 0", "Person 1", "Person 2"]);
        assert_eq!(service.list_decks()[0].card_count, 3);
    }

    #[tokio::test]
    async fn test_study_limit_caps_queue() {
        let (service, deck_id) = service_with_cards(DEFAULT_STUDY_LIMIT + 5);
        let due = service.fetch_due_cards(deck_id).await.unwrap();
        assert_eq!(due.len(), DEFAULT_STUDY_LIMIT);
    }

    #[tokio::test]
    async fn test_reviewed_card_is_no_longer_due() {
        let (service, deck_id) = service_with_cards(2);
        let first = service.fetch_due_cards(deck_id).await.unwrap()[0].id;

        service.submit_review(first, Difficulty::Medium).await.unwrap();

        let due = service.fetch_due_cards(deck_id).await.unwrap();
        assert_eq!(due.len(), 1);
        assert_ne!(due[0].id, first);

        let card = service.get_card(first).unwrap();
        assert_eq!(card.review_count, 1);
        assert_eq!(card.difficulty, 3);
        assert!(card.last_reviewed.is_some());
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let (service, _) = service_with_cards(1);
        assert!(matches!(
            service.fetch_due_cards(42).await,
            Err(ApiError::NotFound(_))
        ));
        assert!(matches!(
            service.submit_review(42, Difficulty::Easy).await,
            Err(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_from_directory() {
        let temp = TempDir::new().unwrap();
        for name in [
            "b_Bob_Wilson_Sales.jpg",
            "Amy Brown - CTO.png",
            "readme.txt",
            " - .png",
        ] {
            std::fs::write(temp.path().join(name), b"x").unwrap();
        }

        let (service, deck_id) = MemoryReviewService::from_directory(temp.path()).unwrap();
        let due = service.fetch_due_cards(deck_id).await.unwrap();
        let people: Vec<(&str, &str)> = due
            .iter()
            .map(|c| (c.person_name.as_str(), c.person_role.as_str()))
            .collect();
        assert_eq!(
            people,
            vec![("Amy Brown", "CTO"), ("b Bob", "Wilson Sales")]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_from_directory_follows_symlinks() {
        let photos = TempDir::new().unwrap();
        let deck_dir = TempDir::new().unwrap();
        let target = photos.path().join("original.jpg");
        std::fs::write(&target, b"x").unwrap();
        std::os::unix::fs::symlink(&target, deck_dir.path().join("Ada Lovelace - Analyst.jpg"))
            .unwrap();
        std::os::unix::fs::symlink(
            photos.path().join("gone.jpg"),
            deck_dir.path().join("Broken Link - Ghost.jpg"),
        )
        .unwrap();
        std::fs::write(deck_dir.path().join("Bob_Wilson_Sales.png"), b"x").unwrap();

        let (service, deck_id) = MemoryReviewService::from_directory(deck_dir.path()).unwrap();
        let due = service.fetch_due_cards(deck_id).await.unwrap();
        let names: Vec<&str> = due.iter().map(|c| c.person_name.as_str()).collect();
        assert_eq!(names, vec!["Ada Lovelace", "Bob Wilson"]);
    }

    #[test]
    fn test_from_directory_missing_dir_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert!(matches!(
            MemoryReviewService::from_directory(&missing),
            Err(ApiError::Io(_))
        ));
    }
}
