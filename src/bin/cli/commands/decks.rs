use anyhow::{bail, Result};

use facecards_lib::flashcards::NewDeck;

use crate::app::{confirm, App};
use crate::render::terminal::{column_width, paint, rule, truncate, Color};
use crate::OutputFormat;

pub fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let decks = app.list_decks()?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&decks)?);
        }
        OutputFormat::Plain => {
            if decks.is_empty() {
                println!("No decks yet. Create one with `facecards-cli deck create <name>`.");
                return Ok(());
            }

            let name_width = column_width(decks.iter().map(|d| d.name.as_str()), 4, 30);
            println!(
                "{:>5} {:<name_w$} {:>6} {}",
                "ID",
                "Name",
                "Cards",
                "Created",
                name_w = name_width
            );
            println!(
                "{} {} {} {}",
                rule(5),
                rule(name_width),
                rule(6),
                rule(10)
            );

            for deck in &decks {
                let name = truncate(&deck.name, name_width);
                println!(
                    "{:>5} {} {:>6} {}",
                    deck.id,
                    paint(&format!("{:<name_width$}", name), Color::BOLD, use_color),
                    deck.card_count,
                    paint(
                        &deck.created_at.format("%Y-%m-%d").to_string(),
                        Color::GRAY,
                        use_color
                    ),
                );
                if let Some(desc) = deck.description.as_deref().filter(|d| !d.is_empty()) {
                    println!("{:>5} {}", "", paint(&truncate(desc, 60), Color::DIM, use_color));
                }
            }
        }
    }

    Ok(())
}

pub fn run_create(
    app: &App,
    name: String,
    description: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let deck = app.create_deck(&new_deck(&name, description)?)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&deck)?),
        OutputFormat::Plain => {
            println!("Created deck \"{}\"", deck.name);
            println!("  ID: {}", deck.id);
        }
    }

    Ok(())
}

/// Request body for a new deck; blank descriptions are dropped
pub fn new_deck(name: &str, description: Option<String>) -> Result<NewDeck> {
    if name.trim().is_empty() {
        bail!("Deck name cannot be empty");
    }
    Ok(NewDeck {
        name: name.trim().to_string(),
        description: description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty()),
    })
}

pub fn run_delete(app: &App, query: &str, yes: bool) -> Result<()> {
    let deck = app.find_deck(query)?;

    if !yes {
        let prompt = format!(
            "Delete deck \"{}\" and its {} cards?",
            deck.name, deck.card_count
        );
        if !confirm(&prompt)? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    app.delete_deck(deck.id)?;
    println!("Deleted deck \"{}\"", deck.name);
    Ok(())
}
