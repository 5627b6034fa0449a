//! Ordered filename rules
//!
//! Each rule either claims a stem (extension already removed) and extracts an
//! identity from it, or passes. Rules are tried top-down and the first one
//! that claims the stem wins. The last rule claims everything, so parsing is
//! total.

use serde::{Deserialize, Serialize};

use super::{ParsedIdentity, DEFAULT_ROLE};

/// Separator for the `"Name - Role"` style
const DASH_SEPARATOR: &str = " - ";

/// Separator for the `"First_Last_Role"` style
const UNDERSCORE_SEPARATOR: char = '_';

/// Which rule produced an identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    /// `"John Doe - Software Engineer"`
    SpacedDash,
    /// `"John_Doe_Software_Engineer"`
    Underscore,
    /// No separator, the whole stem is the name
    Whole,
}

impl RuleKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::SpacedDash => "name - role",
            Self::Underscore => "name_role",
            Self::Whole => "name only",
        }
    }
}

pub struct Rule {
    pub kind: RuleKind,
    pub extract: fn(&str) -> Option<ParsedIdentity>,
}

/// Rules in priority order
pub const RULES: &[Rule] = &[
    Rule {
        kind: RuleKind::SpacedDash,
        extract: spaced_dash,
    },
    Rule {
        kind: RuleKind::Underscore,
        extract: underscore,
    },
    Rule {
        kind: RuleKind::Whole,
        extract: whole,
    },
];

/// Run the rules against an extension-less stem
pub fn apply(stem: &str) -> ParsedIdentity {
    first_match(stem)
        .map(|(_, identity)| identity)
        .unwrap_or_else(|| ParsedIdentity::unassigned(stem.trim()))
}

/// Which rule claims this filename
pub fn matched_rule(filename: &str) -> RuleKind {
    first_match(super::strip_extension(filename))
        .map(|(kind, _)| kind)
        .unwrap_or(RuleKind::Whole)
}

fn first_match(stem: &str) -> Option<(RuleKind, ParsedIdentity)> {
    RULES
        .iter()
        .find_map(|rule| (rule.extract)(stem).map(|identity| (rule.kind, identity)))
}

/// Split on the first `" - "`; an empty role falls back to the default
pub fn spaced_dash(stem: &str) -> Option<ParsedIdentity> {
    let (name, role) = stem.split_once(DASH_SEPARATOR)?;
    let role = role.trim();
    let role = if role.is_empty() { DEFAULT_ROLE } else { role };
    Some(ParsedIdentity::new(name.trim(), role))
}

/// Split on every `_`. Four or more tokens give a two-word role, three
/// tokens a one-word role, two tokens are name and role.
pub fn underscore(stem: &str) -> Option<ParsedIdentity> {
    if !stem.contains(UNDERSCORE_SEPARATOR) {
        return None;
    }

    let tokens: Vec<&str> = stem.split(UNDERSCORE_SEPARATOR).collect();
    let identity = match tokens.len() {
        n if n >= 4 => ParsedIdentity::new(
            tokens[..n - 2].join(" ").trim(),
            tokens[n - 2..].join(" ").trim(),
        ),
        3 => ParsedIdentity::new(tokens[..2].join(" ").trim(), tokens[2].trim()),
        2 => ParsedIdentity::new(tokens[0].trim(), tokens[1].trim()),
        _ => ParsedIdentity::unassigned(stem.replace(UNDERSCORE_SEPARATOR, " ").trim()),
    };
    Some(identity)
}

/// Catch-all: the stem is the name
pub fn whole(stem: &str) -> Option<ParsedIdentity> {
    Some(ParsedIdentity::unassigned(stem.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_order() {
        let kinds: Vec<RuleKind> = RULES.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![RuleKind::SpacedDash, RuleKind::Underscore, RuleKind::Whole]
        );
    }

    #[test]
    fn test_spaced_dash_requires_spaces() {
        assert!(spaced_dash("Jean-Luc Picard").is_none());
        assert!(spaced_dash("A -B").is_none());
        assert_eq!(
            spaced_dash("  Ann  -  Designer  "),
            // " - " matches inside "  -  ", leaving the extra spaces to trim
            Some(ParsedIdentity::new("Ann", "Designer"))
        );
    }

    #[test]
    fn test_underscore_passes_without_underscore() {
        assert!(underscore("John Doe").is_none());
    }

    #[test]
    fn test_underscore_token_counts() {
        assert_eq!(
            underscore("a_b_c_d_e"),
            Some(ParsedIdentity::new("a b c", "d e"))
        );
        assert_eq!(underscore("a_b_c"), Some(ParsedIdentity::new("a b", "c")));
        assert_eq!(underscore("a_b"), Some(ParsedIdentity::new("a", "b")));
    }

    #[test]
    fn test_underscore_empty_tokens_are_trimmed() {
        assert_eq!(underscore("A__B"), Some(ParsedIdentity::new("A", "B")));
        assert_eq!(underscore("A_B_"), Some(ParsedIdentity::new("A B", "")));
    }

    #[test]
    fn test_whole_always_matches() {
        assert_eq!(whole(" Solo "), Some(ParsedIdentity::unassigned("Solo")));
        assert_eq!(whole(""), Some(ParsedIdentity::unassigned("")));
    }

    #[test]
    fn test_matched_rule() {
        assert_eq!(matched_rule("John Doe - Engineer.jpg"), RuleKind::SpacedDash);
        assert_eq!(matched_rule("John_Doe_Engineer.jpg"), RuleKind::Underscore);
        assert_eq!(matched_rule("John Doe.jpg"), RuleKind::Whole);
        // The underscore lives in the extension, which is stripped first
        assert_eq!(matched_rule("John Doe.my_ext"), RuleKind::Whole);
    }
}
