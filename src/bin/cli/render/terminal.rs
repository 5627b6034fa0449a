/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in a color code when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Cut `text` to at most `width` characters, marking the cut with "..."
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    format!("{}...", text.chars().take(keep).collect::<String>())
}

/// Horizontal rule for table headers
pub fn rule(width: usize) -> String {
    "\u{2500}".repeat(width)
}

/// Column width: the longest value, clamped to `min..=max`
pub fn column_width<'a>(values: impl Iterator<Item = &'a str>, min: usize, max: usize) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(min)
        .clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Jane Doe", 10), "Jane Doe");
        assert_eq!(truncate("Mary Jane Watson", 10), "Mary Ja...");
        assert_eq!(truncate("Zoë Saldaña-Perez", 6), "Zoë...");
    }

    #[test]
    fn test_paint_without_color() {
        assert_eq!(paint("CEO", Color::CYAN, false), "CEO");
        assert_eq!(paint("CEO", Color::CYAN, true), "\x1b[36mCEO\x1b[0m");
    }

    #[test]
    fn test_column_width_clamps() {
        let names = ["Al", "Bartholomew Fitzgerald"];
        assert_eq!(column_width(names.iter().copied(), 4, 12), 12);
        assert_eq!(column_width(["Al"].iter().copied(), 4, 12), 4);
        assert_eq!(column_width(std::iter::empty(), 4, 12), 4);
    }
}
