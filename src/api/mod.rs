//! Boundary to the flashcard REST service
//!
//! - [`ReviewService`]: what a study session needs from the scheduler
//! - [`ApiClient`]: reqwest client for decks, cards, reviews and photos

mod client;
mod error;
mod service;

pub use client::ApiClient;
pub use error::ApiError;
pub use service::ReviewService;
