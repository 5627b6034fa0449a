mod app;
mod commands;
mod render;
#[cfg(feature = "tui")]
mod tui;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "facecards-cli", about = "Learn your team's names and faces", version)]
struct Cli {
    /// Flashcard service URL (overrides config and FACECARDS_SERVER_URL)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List teams (decks) with their card counts
    Decks,

    /// Create or delete a deck
    #[command(subcommand)]
    Deck(DeckCommand),

    /// List the cards of a deck
    Cards {
        /// Deck id or name (case-insensitive prefix match)
        deck: String,
    },

    /// Add or delete a single card
    #[command(subcommand)]
    Card(CardCommand),

    /// Show the name and role each photo filename will produce
    Preview {
        /// Photo files, in upload order
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Upload photos as cards; name and role come from the filenames
    Import {
        /// Deck id or name; with --create, the name of the new deck
        #[arg(long)]
        deck: String,
        /// Create the deck before uploading
        #[arg(long)]
        create: bool,
        /// Description of the created deck
        #[arg(long, requires = "create")]
        description: Option<String>,
        /// Photo files, in upload order
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Upload without asking for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Download a stored photo
    Image {
        /// Stored image filename (as listed by `cards`)
        filename: String,
        /// Destination file (defaults to the filename in the current directory)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Study the cards of a deck that are due
    #[cfg(feature = "tui")]
    Study {
        /// Deck id or name
        #[arg(required_unless_present = "offline")]
        deck: Option<String>,
        /// Study a folder of photos without a server
        #[arg(long, value_name = "DIR", conflicts_with = "deck")]
        offline: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum DeckCommand {
    /// Create a new deck
    Create {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a deck and all its cards
    Delete {
        /// Deck id or name
        deck: String,
        /// Delete without asking for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CardCommand {
    /// Add one person with an explicit name and role
    Add {
        /// Deck id or name
        #[arg(long)]
        deck: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: String,
        /// Hint shown next to the photo
        #[arg(long, default_value = "")]
        front: String,
        /// Notes shown with the answer
        #[arg(long, default_value = "")]
        back: String,
        /// Photo file
        image: PathBuf,
    },

    /// Delete a card by id
    Delete { id: i64 },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let server = cli.server.as_deref();

    match cli.command {
        Command::Preview { files } => {
            commands::import::run_preview(&files, &cli.format, use_color)?;
        }
        Command::Decks => {
            let app = app::App::new(server)?;
            commands::decks::run_list(&app, &cli.format, use_color)?;
        }
        Command::Deck(DeckCommand::Create { name, description }) => {
            let app = app::App::new(server)?;
            commands::decks::run_create(&app, name, description, &cli.format)?;
        }
        Command::Deck(DeckCommand::Delete { deck, yes }) => {
            let app = app::App::new(server)?;
            commands::decks::run_delete(&app, &deck, yes)?;
        }
        Command::Cards { deck } => {
            let app = app::App::new(server)?;
            commands::cards::run_list(&app, &deck, &cli.format, use_color)?;
        }
        Command::Card(CardCommand::Add { deck, name, role, front, back, image }) => {
            let app = app::App::new(server)?;
            commands::cards::run_add(&app, &deck, name, role, front, back, &image, &cli.format)?;
        }
        Command::Card(CardCommand::Delete { id }) => {
            let app = app::App::new(server)?;
            commands::cards::run_delete(&app, id)?;
        }
        Command::Import { deck, create, description, files, yes } => {
            let target = commands::import::ImportTarget::from_args(deck, create, description)?;
            let app = app::App::new(server)?;
            commands::import::run_import(&app, target, &files, yes, &cli.format, use_color)?;
        }
        Command::Image { filename, output } => {
            let app = app::App::new(server)?;
            commands::image::run(&app, &filename, output)?;
        }
        #[cfg(feature = "tui")]
        Command::Study { deck, offline } => {
            let summary = match (deck, offline) {
                (_, Some(dir)) => tui::run_offline(&dir)?,
                (Some(deck), None) => {
                    let app = app::App::new(server)?;
                    tui::run_remote(&app, &deck)?
                }
                (None, None) => anyhow::bail!("Give a deck or --offline <DIR>"),
            };
            if let Some(summary) = summary {
                commands::print_summary(&summary, &cli.format)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_create_flags() {
        let cli = Cli::try_parse_from([
            "facecards-cli",
            "import",
            "--deck",
            "Platform",
            "--create",
            "--description",
            "Infra folks",
            "a.jpg",
        ])
        .unwrap();
        match cli.command {
            Command::Import { deck, create, description, files, yes } => {
                assert_eq!(deck, "Platform");
                assert!(create);
                assert_eq!(description.as_deref(), Some("Infra folks"));
                assert_eq!(files, vec![PathBuf::from("a.jpg")]);
                assert!(!yes);
            }
            _ => panic!("expected import"),
        }
    }

    #[test]
    fn test_import_description_requires_create() {
        let result = Cli::try_parse_from([
            "facecards-cli",
            "import",
            "--deck",
            "Platform",
            "--description",
            "Infra folks",
            "a.jpg",
        ]);
        assert!(result.is_err());
    }
}
