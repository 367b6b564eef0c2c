use crate::{
    abstract_trait::{cart::DynCartQueryRepository, catalog::DynCatalogClient},
    domain::response::{CartLineResponse, CartResponse},
};
use shared::errors::RepositoryError;
use uuid::Uuid;

/// Builds the client-facing view of a cart: one catalog lookup per line.
///
/// Lines whose book cannot be looked up are kept with a placeholder book.
#[derive(Clone)]
pub struct CartResolver {
    query: DynCartQueryRepository,
    catalog: DynCatalogClient,
}

impl CartResolver {
    pub fn new(query: DynCartQueryRepository, catalog: DynCatalogClient) -> Self {
        Self { query, catalog }
    }

    pub async fn resolve(&self, cart_id: Uuid) -> Result<CartResponse, RepositoryError> {
        let items = self.query.find_items(cart_id).await?;

        let mut lines = Vec::with_capacity(items.len());
        for item in &items {
            let book = self.catalog.find_book(&item.book_id).await;
            lines.push(CartLineResponse::resolve(item, book));
        }

        Ok(CartResponse {
            cart_id: Some(cart_id),
            items: lines,
        })
    }
}
