use crate::{abstract_trait::catalog::CatalogClientTrait, domain::response::BookResponse};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url, header::HeaderMap};
use shared::utils::inject_current_context;
use tracing::warn;

/// Looks books up at `GET {base_url}/{bookId}` on the book-service.
#[derive(Debug, Clone)]
pub struct CatalogHttpClient {
    client: Client,
    base_url: Url,
}

impl CatalogHttpClient {
    pub fn new(client: Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .with_context(|| format!("Invalid BOOK_SERVICE_URL '{base_url}'"))?;

        if base_url.cannot_be_a_base() {
            return Err(anyhow!("BOOK_SERVICE_URL must be an http(s) URL"));
        }

        Ok(Self { client, base_url })
    }

    fn book_url(&self, book_id: &str) -> Option<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .ok()?
            .pop_if_empty()
            .push(book_id);
        Some(url)
    }
}

#[async_trait]
impl CatalogClientTrait for CatalogHttpClient {
    async fn find_book(&self, book_id: &str) -> Option<BookResponse> {
        let url = self.book_url(book_id)?;

        let mut headers = HeaderMap::new();
        inject_current_context(&mut headers);

        let response = match self.client.get(url).headers(headers).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("⚠️ Catalog lookup failed for book {book_id}: {e}");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!(
                "⚠️ Book not found: {book_id} (catalog answered {})",
                response.status()
            );
            return None;
        }

        match response.json::<BookResponse>().await {
            Ok(book) => Some(book),
            Err(e) => {
                warn!("⚠️ Unreadable catalog record for book {book_id}: {e}");
                None
            }
        }
    }
}
