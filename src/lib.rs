//! Flashcards for learning who is who on a team.
//!
//! - [`identity`]: name and role inferred from photo filenames
//! - [`study`]: the study session controller
//! - [`api`]: client for the flashcard REST service
//! - [`flashcards`]: wire models, reference schedule, offline service
//! - [`config`]: client configuration

pub mod api;
pub mod config;
pub mod flashcards;
pub mod identity;
pub mod study;
