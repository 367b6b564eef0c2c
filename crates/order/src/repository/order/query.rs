use crate::{
    abstract_trait::order::OrderQueryRepositoryTrait,
    model::{Order as OrderModel, OrderRecord},
    repository::order::{ORDER_COLUMNS, attach_items, load_items},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};
use uuid::Uuid;

pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }

    async fn with_items(&self, orders: Vec<OrderModel>) -> Result<Vec<OrderRecord>, RepositoryError> {
        let ids: Vec<Uuid> = orders.iter().map(|order| order.id).collect();
        let items = load_items(&self.db, &ids).await.map_err(|err| {
            error!("❌ Failed to load items for {} order(s): {err:?}", ids.len());
            err
        })?;

        Ok(attach_items(orders, items))
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<OrderRecord>, RepositoryError> {
        info!("🔍 Fetching orders for user {user_id}");

        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY created_at DESC, id"
        );

        let orders = sqlx::query_as::<_, OrderModel>(&sql)
            .bind(user_id)
            .fetch_all(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch orders for user {user_id}: {err:?}");
                RepositoryError::from(err)
            })?;

        self.with_items(orders).await
    }

    async fn find_all(&self) -> Result<Vec<OrderRecord>, RepositoryError> {
        info!("🔍 Fetching all orders");

        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC, id");

        let orders = sqlx::query_as::<_, OrderModel>(&sql)
            .fetch_all(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to fetch all orders: {err:?}");
                RepositoryError::from(err)
            })?;

        self.with_items(orders).await
    }
}
