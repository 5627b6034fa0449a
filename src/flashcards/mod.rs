//! Flashcards for learning who is who on a team
//!
//! This module provides:
//! - Wire models for decks, cards and difficulty ratings
//! - The reference review schedule
//! - An in-memory review service for offline study

pub mod algorithm;
pub mod memory;
pub mod models;

pub use memory::MemoryReviewService;
pub use models::*;
