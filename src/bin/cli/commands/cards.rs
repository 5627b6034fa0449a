use std::path::Path;

use anyhow::{bail, Result};
use chrono::{NaiveDateTime, Utc};

use facecards_lib::flashcards::algorithm::format_interval;
use facecards_lib::flashcards::NewCard;
use facecards_lib::identity::image_mime_type;

use crate::app::App;
use crate::render::terminal::{column_width, paint, rule, truncate, Color};
use crate::OutputFormat;

pub fn run_list(app: &App, query: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let deck = app.find_deck(query)?;
    let cards = app.list_cards(deck.id)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&cards)?);
        }
        OutputFormat::Plain => {
            if cards.is_empty() {
                println!("No cards in \"{}\".", deck.name);
                return Ok(());
            }

            let now = Utc::now().naive_utc();
            let name_width = column_width(cards.iter().map(|c| c.person_name.as_str()), 4, 28);
            let role_width = column_width(cards.iter().map(|c| c.person_role.as_str()), 4, 24);

            println!(
                "{:>5} {:<name_w$} {:<role_w$} {:>7} {}",
                "ID",
                "Name",
                "Role",
                "Reviews",
                "Due",
                name_w = name_width,
                role_w = role_width
            );
            println!(
                "{} {} {} {} {}",
                rule(5),
                rule(name_width),
                rule(role_width),
                rule(7),
                rule(8)
            );

            for card in &cards {
                let name = format!("{:<name_width$}", truncate(&card.person_name, name_width));
                let role = format!("{:<role_width$}", truncate(&card.person_role, role_width));
                println!(
                    "{:>5} {} {} {:>7} {}",
                    card.id,
                    paint(&name, Color::BOLD, use_color),
                    paint(&role, Color::CYAN, use_color),
                    card.review_count,
                    due_label(card.next_review, now, use_color),
                );
            }
            println!();
            println!("{} cards in \"{}\"", cards.len(), deck.name);
        }
    }

    Ok(())
}

/// "due" for cards that can be studied now, otherwise how long until they can
fn due_label(next_review: Option<NaiveDateTime>, now: NaiveDateTime, use_color: bool) -> String {
    match next_review {
        Some(due) if due > now => {
            let days = (due - now).num_days();
            let label = if days == 0 {
                "today".to_string()
            } else {
                format!("in {}", format_interval(days))
            };
            paint(&label, Color::GRAY, use_color)
        }
        _ => paint("due", Color::GREEN, use_color),
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run_add(
    app: &App,
    query: &str,
    name: String,
    role: String,
    front: String,
    back: String,
    image: &Path,
    format: &OutputFormat,
) -> Result<()> {
    if name.trim().is_empty() {
        bail!("Name cannot be empty");
    }
    if image_mime_type(image).is_none() {
        bail!("{} is not an image", image.display());
    }

    let deck = app.find_deck(query)?;
    let card = app.create_card(
        &NewCard {
            deck_id: deck.id,
            person_name: name.trim().to_string(),
            person_role: role.trim().to_string(),
            front,
            back,
        },
        image,
    )?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&card)?),
        OutputFormat::Plain => {
            println!(
                "Added {} ({}) to \"{}\"",
                card.person_name, card.person_role, deck.name
            );
            println!("  ID: {}", card.id);
        }
    }

    Ok(())
}

pub fn run_delete(app: &App, card_id: i64) -> Result<()> {
    app.delete_card(card_id)?;
    println!("Deleted card {}", card_id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_due_label() {
        let now = now();
        assert_eq!(due_label(None, now, false), "due");
        assert_eq!(due_label(Some(now - Duration::days(1)), now, false), "due");
        assert_eq!(due_label(Some(now + Duration::hours(3)), now, false), "today");
        assert_eq!(due_label(Some(now + Duration::days(4)), now, false), "in 4d");
        assert_eq!(due_label(Some(now + Duration::days(14)), now, false), "in 2w");
    }
}
