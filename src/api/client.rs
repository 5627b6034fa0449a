use std::path::Path;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::{ApiError, ReviewService};
use crate::config::ClientConfig;
use crate::flashcards::{
    CardId, Deck, DeckId, Difficulty, Flashcard, NewCard, NewDeck, ReviewRequest,
};
use crate::identity::image_mime_type;

/// HTTP client for the flashcard service
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    study_limit: Option<u32>,
}

impl ApiClient {
    /// Create a new client from configuration
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        // Normalize URL - ensure no trailing slash
        let base_url = config.server_url.trim().trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::InvalidUrl(format!(
                "{} (URL must start with http:// or https://)",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
            study_limit: config.study_limit,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build full URL for a path
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Map non-success statuses to errors
    async fn check(response: Response, what: &str) -> Result<Response, ApiError> {
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(what.to_string())),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                Err(ApiError::from_body(status.as_u16(), &body))
            }
            _ => Ok(response),
        }
    }

    // ==================== Decks ====================

    /// GET /decks
    pub async fn list_decks(&self) -> Result<Vec<Deck>, ApiError> {
        let response = self.request(Method::GET, "decks").send().await?;
        let response = Self::check(response, "decks").await?;
        Ok(response.json().await?)
    }

    /// POST /decks
    pub async fn create_deck(&self, deck: &NewDeck) -> Result<Deck, ApiError> {
        let response = self.request(Method::POST, "decks").json(deck).send().await?;
        let response = Self::check(response, "decks").await?;
        let created: Deck = response.json().await?;
        log::info!("Created deck {} ({})", created.name, created.id);
        Ok(created)
    }

    /// DELETE /decks/{id}
    pub async fn delete_deck(&self, deck_id: DeckId) -> Result<(), ApiError> {
        let path = format!("decks/{}", deck_id);
        let response = self.request(Method::DELETE, &path).send().await?;
        Self::check(response, &format!("deck {}", deck_id)).await?;
        log::info!("Deleted deck {}", deck_id);
        Ok(())
    }

    // ==================== Cards ====================

    /// GET /decks/{id}/cards
    pub async fn list_cards(&self, deck_id: DeckId) -> Result<Vec<Flashcard>, ApiError> {
        let path = format!("decks/{}/cards", deck_id);
        let response = self.request(Method::GET, &path).send().await?;
        let response = Self::check(response, &format!("deck {}", deck_id)).await?;
        Ok(response.json().await?)
    }

    /// POST /cards - one card with its photo
    pub async fn create_card(&self, card: &NewCard, image: &Path) -> Result<Flashcard, ApiError> {
        let form = Form::new()
            .text("deck_id", card.deck_id.to_string())
            .text("person_name", card.person_name.clone())
            .text("person_role", card.person_role.clone())
            .text("front", card.front.clone())
            .text("back", card.back.clone())
            .part("image", image_part(image).await?);

        let response = self.request(Method::POST, "cards").multipart(form).send().await?;
        let response = Self::check(response, &format!("deck {}", card.deck_id)).await?;
        let created: Flashcard = response.json().await?;
        log::info!("Created card {} for {}", created.id, created.person_name);
        Ok(created)
    }

    /// POST /cards/bulk - the server derives name and role from each filename
    pub async fn bulk_create_cards<P: AsRef<Path>>(
        &self,
        deck_id: DeckId,
        images: &[P],
    ) -> Result<Vec<Flashcard>, ApiError> {
        let mut form = Form::new().text("deck_id", deck_id.to_string());
        for image in images {
            form = form.part("images", image_part(image.as_ref()).await?);
        }

        log::info!("Uploading {} photos to deck {}", images.len(), deck_id);
        let response = self
            .request(Method::POST, "cards/bulk")
            .multipart(form)
            .send()
            .await?;
        let response = Self::check(response, &format!("deck {}", deck_id)).await?;
        let created: Vec<Flashcard> = response.json().await?;
        log::info!("Server created {} cards in deck {}", created.len(), deck_id);
        Ok(created)
    }

    /// DELETE /cards/{id}
    pub async fn delete_card(&self, card_id: CardId) -> Result<(), ApiError> {
        let path = format!("cards/{}", card_id);
        let response = self.request(Method::DELETE, &path).send().await?;
        Self::check(response, &format!("card {}", card_id)).await?;
        Ok(())
    }

    // ==================== Study ====================

    /// GET /decks/{id}/study
    pub async fn fetch_study_cards(&self, deck_id: DeckId) -> Result<Vec<Flashcard>, ApiError> {
        let path = format!("decks/{}/study", deck_id);
        let mut builder = self.request(Method::GET, &path);
        if let Some(limit) = self.study_limit {
            builder = builder.query(&[("limit", limit)]);
        }

        let response = builder.send().await?;
        let response = Self::check(response, &format!("deck {}", deck_id)).await?;
        let cards: Vec<Flashcard> = response.json().await?;
        log::debug!("Deck {} has {} cards due", deck_id, cards.len());
        Ok(cards)
    }

    /// POST /cards/{id}/review. The response body carries nothing we use.
    pub async fn post_review(&self, card_id: CardId, difficulty: Difficulty) -> Result<(), ApiError> {
        let path = format!("cards/{}/review", card_id);
        let body = ReviewRequest {
            card_id,
            difficulty,
        };

        let response = self.request(Method::POST, &path).json(&body).send().await?;
        Self::check(response, &format!("card {}", card_id)).await?;
        log::debug!("Reviewed card {} as {}", card_id, difficulty);
        Ok(())
    }

    // ==================== Images ====================

    /// Public URL of a stored photo
    pub fn image_url(&self, filename: &str) -> String {
        self.url(&format!("uploads/{}", urlencoding::encode(filename)))
    }

    /// GET /uploads/{filename}, streamed into `out`. Returns the byte count.
    pub async fn download_image<W>(&self, filename: &str, out: &mut W) -> Result<u64, ApiError>
    where
        W: AsyncWrite + Unpin,
    {
        let response = self
            .client
            .get(self.image_url(filename))
            .send()
            .await?;
        let response = Self::check(response, filename).await?;

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(ApiError::Http)?;
            out.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        out.flush().await?;

        Ok(written)
    }
}

#[async_trait]
impl ReviewService for ApiClient {
    async fn fetch_due_cards(&self, deck_id: DeckId) -> Result<Vec<Flashcard>, ApiError> {
        self.fetch_study_cards(deck_id).await
    }

    async fn submit_review(&self, card_id: CardId, difficulty: Difficulty) -> Result<(), ApiError> {
        self.post_review(card_id, difficulty).await
    }
}

/// Multipart part for a photo on disk, keeping its original filename
async fn image_part(path: &Path) -> Result<Part, ApiError> {
    let data = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    let mime = image_mime_type(path).unwrap_or("application/octet-stream");

    Ok(Part::bytes(data).file_name(file_name).mime_str(mime)?)
}
