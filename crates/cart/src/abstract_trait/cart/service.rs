use crate::domain::response::CartResponse;
use async_trait::async_trait;
use mockall::automock;
use shared::{domain::MessageResponse, errors::ServiceError};
use std::sync::Arc;
use uuid::Uuid;

pub type DynCartQueryService = Arc<dyn CartQueryServiceTrait + Send + Sync>;
pub type DynCartCommandService = Arc<dyn CartCommandServiceTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait CartQueryServiceTrait {
    async fn get_cart(&self, user_id: &str) -> Result<CartResponse, ServiceError>;
}

#[automock]
#[async_trait]
pub trait CartCommandServiceTrait {
    async fn add_one(&self, user_id: &str, book_id: &str) -> Result<CartResponse, ServiceError>;
    async fn remove_one(&self, user_id: &str, book_id: &str)
    -> Result<CartResponse, ServiceError>;
    async fn remove_line(&self, item_id: Uuid) -> Result<CartResponse, ServiceError>;
    /// Privileged: `credential` must equal the shared service token.
    async fn clear_all(
        &self,
        user_id: &str,
        credential: Option<String>,
    ) -> Result<MessageResponse, ServiceError>;
}
