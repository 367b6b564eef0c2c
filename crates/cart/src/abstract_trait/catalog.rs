use crate::domain::response::BookResponse;
use async_trait::async_trait;
use mockall::automock;
use std::sync::Arc;

pub type DynCatalogClient = Arc<dyn CatalogClientTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait CatalogClientTrait {
    /// `None` when the book does not exist or the catalog could not be reached.
    async fn find_book(&self, book_id: &str) -> Option<BookResponse>;
}
