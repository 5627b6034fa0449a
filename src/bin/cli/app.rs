use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::runtime::Runtime;

use facecards_lib::api::ApiClient;
use facecards_lib::config::ClientConfig;
use facecards_lib::flashcards::{CardId, Deck, DeckId, Flashcard, NewCard, NewDeck};

/// Shared application state for CLI commands
pub struct App {
    pub config: ClientConfig,
    pub client: Arc<ApiClient>,
    runtime: Runtime,
}

impl App {
    /// Load configuration and connect to the flashcard service
    pub fn new(server: Option<&str>) -> Result<Self> {
        let mut config = ClientConfig::load().context("Failed to load config")?;
        config.apply_overrides(server.map(str::to_string), None);
        log::debug!("Using flashcard service at {}", config.server_url);

        let client = ApiClient::new(&config).context("Failed to create API client")?;
        let runtime = Runtime::new().context("Failed to start async runtime")?;

        Ok(Self {
            config,
            client: Arc::new(client),
            runtime,
        })
    }

    /// Run a future to completion on the CLI's runtime
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    #[cfg(feature = "tui")]
    pub fn handle(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    /// List all decks
    pub fn list_decks(&self) -> Result<Vec<Deck>> {
        self.block_on(self.client.list_decks())
            .context("Failed to list decks")
    }

    /// Find a deck by id or by name (case-insensitive prefix match)
    pub fn find_deck(&self, query: &str) -> Result<Deck> {
        let decks = self.list_decks()?;

        if let Ok(id) = query.trim().parse::<DeckId>() {
            if let Some(deck) = decks.iter().find(|d| d.id == id) {
                return Ok(deck.clone());
            }
        }

        let query_lower = query.to_lowercase();

        // Exact match first
        if let Some(deck) = decks.iter().find(|d| d.name.to_lowercase() == query_lower) {
            return Ok(deck.clone());
        }

        // Prefix match
        let matches: Vec<&Deck> = decks
            .iter()
            .filter(|d| d.name.to_lowercase().starts_with(&query_lower))
            .collect();

        match matches.len() {
            0 => bail!(
                "No deck matching '{}'. Available decks:\n{}",
                query,
                decks
                    .iter()
                    .map(|d| format!("  - {} (#{})", d.name, d.id))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
            1 => Ok(matches[0].clone()),
            _ => bail!(
                "Ambiguous deck name '{}'. Matches:\n{}",
                query,
                matches
                    .iter()
                    .map(|d| format!("  - {} (#{})", d.name, d.id))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
        }
    }

    pub fn create_deck(&self, deck: &NewDeck) -> Result<Deck> {
        self.block_on(self.client.create_deck(deck))
            .context("Failed to create deck")
    }

    pub fn delete_deck(&self, deck_id: DeckId) -> Result<()> {
        self.block_on(self.client.delete_deck(deck_id))
            .context("Failed to delete deck")
    }

    pub fn list_cards(&self, deck_id: DeckId) -> Result<Vec<Flashcard>> {
        self.block_on(self.client.list_cards(deck_id))
            .context("Failed to list cards")
    }

    pub fn create_card(&self, card: &NewCard, image: &Path) -> Result<Flashcard> {
        self.block_on(self.client.create_card(card, image))
            .context("Failed to create card")
    }

    /// Upload photos in one request; name and role come from the filenames
    pub fn bulk_create_cards<P: AsRef<Path>>(
        &self,
        deck_id: DeckId,
        images: &[P],
    ) -> Result<Vec<Flashcard>> {
        self.block_on(self.client.bulk_create_cards(deck_id, images))
            .context("Failed to upload cards")
    }

    pub fn delete_card(&self, card_id: CardId) -> Result<()> {
        self.block_on(self.client.delete_card(card_id))
            .context("Failed to delete card")
    }
}

/// Ask a yes/no question on stdin; anything but "y"/"yes" declines
pub fn confirm(prompt: &str) -> Result<bool> {
    use std::io::Write;

    print!("{} [y/N] ", prompt);
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .context("Failed to read answer")?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
