use crate::domain::response::OrderResponse;
use async_trait::async_trait;
use mockall::automock;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOrderQueryService = Arc<dyn OrderQueryServiceTrait + Send + Sync>;
pub type DynOrderCommandService = Arc<dyn OrderCommandServiceTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait OrderQueryServiceTrait {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<OrderResponse>, ServiceError>;
    async fn list_all(&self) -> Result<Vec<OrderResponse>, ServiceError>;
}

#[automock]
#[async_trait]
pub trait OrderCommandServiceTrait {
    async fn update_status(
        &self,
        order_id: &str,
        status: Option<String>,
    ) -> Result<OrderResponse, ServiceError>;
}
