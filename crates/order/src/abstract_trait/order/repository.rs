use crate::{
    domain::requests::CreateOrderRecordRequest,
    model::{OrderRecord, OrderStatus},
};
use async_trait::async_trait;
use mockall::automock;
use shared::errors::RepositoryError;
use std::sync::Arc;
use uuid::Uuid;

pub type DynOrderQueryRepository = Arc<dyn OrderQueryRepositoryTrait + Send + Sync>;
pub type DynOrderCommandRepository = Arc<dyn OrderCommandRepositoryTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait OrderQueryRepositoryTrait {
    /// Newest first.
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<OrderRecord>, RepositoryError>;
    /// Newest first, across all users.
    async fn find_all(&self) -> Result<Vec<OrderRecord>, RepositoryError>;
}

#[automock]
#[async_trait]
pub trait OrderCommandRepositoryTrait {
    /// Inserts the order and its items atomically, with status `pending`.
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<OrderRecord, RepositoryError>;
    /// `None` when no order has this id.
    async fn update_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<OrderRecord>, RepositoryError>;
}
