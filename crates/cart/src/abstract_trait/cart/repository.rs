use crate::model::{Cart as CartModel, CartItem as CartItemModel};
use async_trait::async_trait;
use mockall::automock;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynCartQueryRepository = Arc<dyn CartQueryRepositoryTrait + Send + Sync>;
pub type DynCartCommandRepository = Arc<dyn CartCommandRepositoryTrait + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum DecrementOutcome {
    Decremented(CartItemModel),
    Removed,
    NotInCart,
}

#[automock]
#[async_trait]
pub trait CartQueryRepositoryTrait {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<CartModel>, RepositoryError>;
    async fn find_items(&self, cart_id: Uuid) -> Result<Vec<CartItemModel>, RepositoryError>;
}

#[automock]
#[async_trait]
pub trait CartCommandRepositoryTrait {
    /// Returns the user's cart, creating it when absent.
    async fn get_or_create(&self, user_id: &str) -> Result<CartModel, RepositoryError>;
    /// Adds one unit of `book_id`, merging into an existing line.
    async fn increment_item(
        &self,
        cart_id: Uuid,
        book_id: &str,
    ) -> Result<CartItemModel, RepositoryError>;
    async fn decrement_item(
        &self,
        cart_id: Uuid,
        book_id: &str,
    ) -> Result<DecrementOutcome, RepositoryError>;
    /// Returns the deleted line, or `None` if it did not exist.
    async fn delete_item(&self, item_id: Uuid) -> Result<Option<CartItemModel>, RepositoryError>;
    async fn clear(&self, cart_id: Uuid) -> Result<u64, RepositoryError>;
}
