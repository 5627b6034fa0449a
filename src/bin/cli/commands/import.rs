use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use facecards_lib::flashcards::NewDeck;
use facecards_lib::identity::ImportPreview;

use super::decks::new_deck;
use crate::app::{confirm, App};
use crate::render::terminal::{column_width, paint, rule, truncate, Color};
use crate::OutputFormat;

pub fn run_preview(files: &[PathBuf], format: &OutputFormat, use_color: bool) -> Result<()> {
    let preview = ImportPreview::from_paths(files);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&preview.entries)?),
        OutputFormat::Plain => print_preview(&preview, use_color),
    }

    Ok(())
}

fn print_preview(preview: &ImportPreview, use_color: bool) {
    let file_width = column_width(preview.entries.iter().map(|e| e.file_name.as_str()), 4, 36);
    let name_width = column_width(
        preview.entries.iter().map(|e| e.identity.name.as_str()),
        4,
        28,
    );

    println!(
        "{:<file_w$} {:<name_w$} {}",
        "File",
        "Name",
        "Role",
        file_w = file_width,
        name_w = name_width
    );
    println!("{} {} {}", rule(file_width), rule(name_width), rule(20));

    for entry in &preview.entries {
        let file = format!("{:<file_width$}", truncate(&entry.file_name, file_width));
        match entry.issue {
            Some(issue) => println!(
                "{} {}",
                paint(&file, Color::GRAY, use_color),
                paint(&format!("skipped: {}", issue.describe()), Color::RED, use_color)
            ),
            None => {
                let name = format!("{:<name_width$}", truncate(&entry.identity.name, name_width));
                println!(
                    "{} {} {}  {}",
                    file,
                    paint(&name, Color::BOLD, use_color),
                    paint(&entry.identity.role, Color::CYAN, use_color),
                    paint(&format!("({})", entry.rule.label()), Color::DIM, use_color),
                );
            }
        }
    }

    let accepted = preview.accepted().count();
    println!();
    println!("{} of {} files will become cards", accepted, preview.len());
}

/// Where imported photos go
pub enum ImportTarget {
    /// An existing deck, by id or name
    Existing(String),
    /// A deck created just before the upload
    New(NewDeck),
}

impl ImportTarget {
    /// `deck` names a deck to create when `create` is set, otherwise one to find
    pub fn from_args(deck: String, create: bool, description: Option<String>) -> Result<Self> {
        if create {
            Ok(Self::New(new_deck(&deck, description)?))
        } else {
            Ok(Self::Existing(deck))
        }
    }

    fn name(&self) -> &str {
        match self {
            Self::Existing(query) => query,
            Self::New(deck) => &deck.name,
        }
    }
}

pub fn run_import(
    app: &App,
    target: ImportTarget,
    files: &[PathBuf],
    yes: bool,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let preview = ImportPreview::from_paths(files);
    let upload: Vec<&Path> = preview.accepted().map(|e| e.path.as_path()).collect();

    if upload.is_empty() {
        bail!("None of the {} files can become a card", preview.len());
    }

    // Resolve an existing deck before asking, so a typo fails early
    let existing = match &target {
        ImportTarget::Existing(query) => Some(app.find_deck(query)?),
        ImportTarget::New(_) => None,
    };

    if !yes {
        print_preview(&preview, use_color);
        let prompt = match &existing {
            Some(deck) => format!("Upload {} photos to \"{}\"?", upload.len(), deck.name),
            None => format!(
                "Create deck \"{}\" and upload {} photos?",
                target.name(),
                upload.len()
            ),
        };
        if !confirm(&prompt)? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let deck = match (existing, target) {
        (Some(deck), _) => deck,
        (None, ImportTarget::New(new)) => app.create_deck(&new)?,
        (None, ImportTarget::Existing(query)) => app.find_deck(&query)?,
    };
    log::info!("Importing {} photos into deck {}", upload.len(), deck.id);

    let created = app.bulk_create_cards(deck.id, &upload)?;
    if created.len() < upload.len() {
        log::warn!(
            "Server created {} of {} uploaded cards",
            created.len(),
            upload.len()
        );
    }

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deckId": deck.id,
                "deckName": deck.name,
                "created": created,
                "skipped": preview.rejected().map(|e| &e.file_name).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            for card in &created {
                println!(
                    "  {} {} ({})",
                    paint("+", Color::GREEN, use_color),
                    card.person_name,
                    card.person_role
                );
            }
            let skipped = preview.len() - upload.len();
            let mut summary = format!("Added {} cards to \"{}\"", created.len(), deck.name);
            if skipped > 0 {
                summary.push_str(&format!(", skipped {}", skipped));
            }
            println!("{}", paint(&summary, Color::YELLOW, use_color));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_target_from_args() {
        let target = ImportTarget::from_args(" Platform ".to_string(), true, Some("Infra".to_string()))
            .unwrap();
        match &target {
            ImportTarget::New(deck) => {
                assert_eq!(deck.name, "Platform");
                assert_eq!(deck.description.as_deref(), Some("Infra"));
            }
            ImportTarget::Existing(_) => panic!("expected a new deck"),
        }
        assert_eq!(target.name(), "Platform");

        let target = ImportTarget::from_args("plat".to_string(), false, None).unwrap();
        assert!(matches!(&target, ImportTarget::Existing(q) if q == "plat"));

        assert!(ImportTarget::from_args(" ".to_string(), true, None).is_err());
    }
}
