//! Data models for decks, cards and reviews as the flashcard service sends them

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type DeckId = i64;
pub type CardId = i64;

/// A deck is a team whose members are learned together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub card_count: usize,
}

/// Body for `POST /decks`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDeck {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A flashcard showing a person's photo on the front and who they are on the back.
///
/// Owned by the server; a study session only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: CardId,
    #[serde(default)]
    pub deck_id: DeckId,
    /// Optional hint shown next to the photo
    #[serde(default)]
    pub front: Option<String>,
    /// Optional notes shown with the answer
    #[serde(default)]
    pub back: Option<String>,
    pub person_name: String,
    pub person_role: String,
    /// Stored image name, served from `/uploads/{filename}`
    #[serde(default)]
    pub image_filename: Option<String>,
    /// Last difficulty rating (1-5)
    #[serde(default = "default_difficulty")]
    pub difficulty: i32,
    #[serde(default)]
    pub last_reviewed: Option<NaiveDateTime>,
    #[serde(default)]
    pub next_review: Option<NaiveDateTime>,
    #[serde(default)]
    pub review_count: i32,
}

fn default_difficulty() -> i32 {
    1
}

impl Flashcard {
    /// Front hint, if it carries any text
    pub fn front_text(&self) -> Option<&str> {
        self.front.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Back notes, if they carry any text
    pub fn back_text(&self) -> Option<&str> {
        self.back.as_deref().filter(|s| !s.trim().is_empty())
    }
}

/// Text fields of a single card upload (`POST /cards`, multipart)
#[derive(Debug, Clone, Default)]
pub struct NewCard {
    pub deck_id: DeckId,
    pub person_name: String,
    pub person_role: String,
    pub front: String,
    pub back: String,
}

/// How well the person was recalled. The numeric value is sent verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "i64")]
pub enum Difficulty {
    Hard = 1,
    MediumHard = 2,
    Medium = 3,
    MediumEasy = 4,
    Easy = 5,
}

impl Difficulty {
    pub const ALL: [Difficulty; 5] = [
        Self::Hard,
        Self::MediumHard,
        Self::Medium,
        Self::MediumEasy,
        Self::Easy,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hard => "Hard",
            Self::MediumHard => "Medium-Hard",
            Self::Medium => "Medium",
            Self::MediumEasy => "Medium-Easy",
            Self::Easy => "Easy",
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(d: Difficulty) -> Self {
        d.value()
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = InvalidDifficulty;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Hard),
            2 => Ok(Self::MediumHard),
            3 => Ok(Self::Medium),
            4 => Ok(Self::MediumEasy),
            5 => Ok(Self::Easy),
            other => Err(InvalidDifficulty(other)),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("difficulty must be between 1 and 5, got {0}")]
pub struct InvalidDifficulty(pub i64);

/// Body for `POST /cards/{card_id}/review`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub card_id: CardId,
    pub difficulty: Difficulty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_bounds() {
        assert_eq!(Difficulty::try_from(1), Ok(Difficulty::Hard));
        assert_eq!(Difficulty::try_from(5), Ok(Difficulty::Easy));
        assert_eq!(Difficulty::try_from(0), Err(InvalidDifficulty(0)));
        assert_eq!(Difficulty::try_from(6), Err(InvalidDifficulty(6)));
    }

    #[test]
    fn test_review_request_wire_format() {
        let body = ReviewRequest {
            card_id: 7,
            difficulty: Difficulty::MediumEasy,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "card_id": 7, "difficulty": 4 }));

        let bad: Result<ReviewRequest, _> =
            serde_json::from_str(r#"{"card_id": 7, "difficulty": 9}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_flashcard_from_server_json() {
        let json = r#"{
            "id": 3,
            "deck_id": 1,
            "front": "",
            "back": null,
            "person_name": "John Doe",
            "person_role": "Software Engineer",
            "image_filename": "0b4c.jpg",
            "difficulty": 1,
            "last_reviewed": null,
            "next_review": "2025-01-02T10:30:00.123456",
            "review_count": 0
        }"#;
        let card: Flashcard = serde_json::from_str(json).unwrap();
        assert_eq!(card.person_name, "John Doe");
        assert_eq!(card.front_text(), None);
        assert_eq!(card.back_text(), None);
        assert!(card.next_review.is_some());
    }

    #[test]
    fn test_deck_from_server_json() {
        let json = r#"{"id": 1, "name": "Platform", "description": null,
                       "created_at": "2025-01-01T09:00:00", "card_count": 4}"#;
        let deck: Deck = serde_json::from_str(json).unwrap();
        assert_eq!(deck.card_count, 4);
        assert_eq!(deck.description, None);
    }
}
