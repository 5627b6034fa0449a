//! Reference review scheduler
//!
//! The flashcard service decides when a card is due again; clients never run
//! this. It backs the in-memory service used for offline study and tests, and
//! follows the service's schedule:
//!
//! | Difficulty  | Base interval |
//! |-------------|---------------|
//! | Hard        | 1 day         |
//! | Medium-Hard | 2 days        |
//! | Medium      | 4 days        |
//! | Medium-Easy | 1 week        |
//! | Easy        | 2 weeks       |
//!
//! After the first review the interval grows by a factor of 1.3 per review.

use chrono::{Duration, NaiveDateTime};

use super::models::Difficulty;

/// Growth factor applied per completed review
const REPETITION_FACTOR: f64 = 1.3;

/// Base interval in days for a difficulty rating
pub fn base_interval(difficulty: Difficulty) -> i64 {
    match difficulty {
        Difficulty::Hard => 1,
        Difficulty::MediumHard => 2,
        Difficulty::Medium => 4,
        Difficulty::MediumEasy => 7,
        Difficulty::Easy => 14,
    }
}

/// Interval in whole days, `review_count` being the count including this review
pub fn interval_days(difficulty: Difficulty, review_count: i32) -> i64 {
    let base = base_interval(difficulty) as f64;
    let interval = if review_count > 0 {
        base * REPETITION_FACTOR.powi(review_count)
    } else {
        base
    };
    interval as i64
}

/// When a card rated `difficulty` is due again
pub fn calculate_next_review(
    difficulty: Difficulty,
    review_count: i32,
    now: NaiveDateTime,
) -> NaiveDateTime {
    now + Duration::days(interval_days(difficulty, review_count))
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: i64) -> String {
    if days == 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_base_intervals() {
        let days: Vec<i64> = Difficulty::ALL.iter().map(|d| base_interval(*d)).collect();
        assert_eq!(days, vec![1, 2, 4, 7, 14]);
    }

    #[test]
    fn test_first_review_grows_once() {
        // 7 * 1.3 = 9.1
        assert_eq!(interval_days(Difficulty::MediumEasy, 1), 9);
        // 1 * 1.3 = 1.3
        assert_eq!(interval_days(Difficulty::Hard, 1), 1);
    }

    #[test]
    fn test_interval_grows_with_reviews() {
        // 14 * 1.3^3 = 30.758
        assert_eq!(interval_days(Difficulty::Easy, 3), 30);
        assert_eq!(interval_days(Difficulty::Easy, 0), 14);
    }

    #[test]
    fn test_calculate_next_review() {
        let next = calculate_next_review(Difficulty::Medium, 1, noon());
        // 4 * 1.3 = 5.2
        assert_eq!(next, noon() + Duration::days(5));
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0), "now");
        assert_eq!(format_interval(1), "1d");
        assert_eq!(format_interval(5), "5d");
        assert_eq!(format_interval(7), "1w");
        assert_eq!(format_interval(14), "2w");
        assert_eq!(format_interval(30), "1mo");
        assert_eq!(format_interval(90), "3mo");
        assert_eq!(format_interval(365), "1y");
        assert_eq!(format_interval(730), "2y");
    }
}
