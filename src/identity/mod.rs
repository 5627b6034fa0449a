//! Person identity inferred from photo filenames
//!
//! Bulk imports name each photo after the person in it, either as
//! `"Jane Smith - Marketing Manager.png"` or `"Jane_Smith_Marketing_Manager.png"`.
//! This module turns such filenames into a name and a role:
//! - Ordered parsing rules, first match wins (see [`rules`])
//! - Index-aligned batch parsing
//! - Import previews that flag files the server would reject

pub mod preview;
pub mod rules;

use serde::{Deserialize, Serialize};

pub use preview::{image_mime_type, ImportPreview, PreviewEntry, PreviewIssue};
pub use rules::{matched_rule, RuleKind};

/// Role used when a filename does not say what the person does
pub const DEFAULT_ROLE: &str = "Team Member";

/// Name and role extracted from a filename. Always fully populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedIdentity {
    pub name: String,
    pub role: String,
}

impl ParsedIdentity {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }

    /// Identity carrying the default role
    pub fn unassigned(name: impl Into<String>) -> Self {
        Self::new(name, DEFAULT_ROLE)
    }
}

/// Parse a single filename. Never fails; malformed input degrades to
/// the whole stem as the name and the default role.
pub fn parse_filename(filename: &str) -> ParsedIdentity {
    rules::apply(strip_extension(filename))
}

/// Parse every filename, keeping the output aligned with the input by index
pub fn parse_batch<S: AsRef<str>>(filenames: &[S]) -> Vec<ParsedIdentity> {
    filenames.iter().map(|f| parse_filename(f.as_ref())).collect()
}

/// Drop the text after the final `.`; a name without a dot is returned as-is
pub fn strip_extension(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, _)) => stem,
        None => filename,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_separated() {
        assert_eq!(
            parse_filename("John Doe - Software Engineer.jpg"),
            ParsedIdentity::new("John Doe", "Software Engineer")
        );
        assert_eq!(
            parse_filename("Alice Johnson - Product Manager.jpeg"),
            ParsedIdentity::new("Alice Johnson", "Product Manager")
        );
    }

    #[test]
    fn test_underscore_four_tokens_takes_two_word_role() {
        assert_eq!(
            parse_filename("Jane_Smith_Marketing_Manager.png"),
            ParsedIdentity::new("Jane Smith", "Marketing Manager")
        );
    }

    #[test]
    fn test_underscore_three_tokens_takes_one_word_role() {
        assert_eq!(
            parse_filename("Bob_Wilson_Sales.jpg"),
            ParsedIdentity::new("Bob Wilson", "Sales")
        );
        assert_eq!(
            parse_filename("Tom_Brown_HR.jpg"),
            ParsedIdentity::new("Tom Brown", "HR")
        );
    }

    #[test]
    fn test_underscore_two_tokens() {
        assert_eq!(
            parse_filename("Sarah_Davis.png"),
            ParsedIdentity::new("Sarah", "Davis")
        );
    }

    #[test]
    fn test_no_separator_uses_default_role() {
        assert_eq!(parse_filename("Solo.png"), ParsedIdentity::unassigned("Solo"));
        assert_eq!(
            parse_filename("Mike Thompson.jpg"),
            ParsedIdentity::unassigned("Mike Thompson")
        );
    }

    #[test]
    fn test_empty_role_falls_back_to_default() {
        assert_eq!(parse_filename("A - .jpg"), ParsedIdentity::unassigned("A"));
    }

    #[test]
    fn test_four_word_name_is_split_as_two_word_role() {
        // Known limitation: multi-word roles win over multi-word names
        assert_eq!(
            parse_filename("Mary_Jane_Watson_CEO.jpg"),
            ParsedIdentity::new("Mary Jane", "Watson CEO")
        );
    }

    #[test]
    fn test_dash_wins_over_underscore() {
        assert_eq!(
            parse_filename("Jean_Luc Picard - Captain_Of_Ship.png"),
            ParsedIdentity::new("Jean_Luc Picard", "Captain_Of_Ship")
        );
    }

    #[test]
    fn test_only_first_dash_splits() {
        assert_eq!(
            parse_filename("Ann Lee - VP - Sales.jpg"),
            ParsedIdentity::new("Ann Lee", "VP - Sales")
        );
    }

    #[test]
    fn test_multiple_dots_strip_last_extension_only() {
        assert_eq!(
            parse_filename("Dr. Who - Time Lord.final.png"),
            ParsedIdentity::new("Dr. Who", "Time Lord.final")
        );
    }

    #[test]
    fn test_total_on_degenerate_input() {
        assert_eq!(parse_filename(""), ParsedIdentity::unassigned(""));
        assert_eq!(parse_filename(".jpg"), ParsedIdentity::unassigned(""));
        assert_eq!(parse_filename("..."), ParsedIdentity::unassigned(".."));
        assert_eq!(parse_filename("noext"), ParsedIdentity::unassigned("noext"));
        assert_eq!(parse_filename("_.png"), ParsedIdentity::new("", ""));
        assert_eq!(parse_filename(" - "), ParsedIdentity::unassigned(""));
    }

    #[test]
    fn test_batch_preserves_order() {
        let files = ["b_c.png", "Solo.jpg", "X - Y.jpg"];
        let parsed = parse_batch(&files);
        assert_eq!(
            parsed,
            vec![
                ParsedIdentity::new("b", "c"),
                ParsedIdentity::unassigned("Solo"),
                ParsedIdentity::new("X", "Y"),
            ]
        );
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("a.b.c"), "a.b");
        assert_eq!(strip_extension("plain"), "plain");
        assert_eq!(strip_extension("trailing."), "trailing");
    }
}
