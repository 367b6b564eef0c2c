use crate::{
    abstract_trait::cart::CartQueryRepositoryTrait,
    model::{Cart as CartModel, CartItem as CartItemModel},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::error;
use uuid::Uuid;

pub struct CartQueryRepository {
    db: ConnectionPool,
}

impl CartQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartQueryRepositoryTrait for CartQueryRepository {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<CartModel>, RepositoryError> {
        sqlx::query_as::<_, CartModel>(
            r#"
            SELECT id, user_id, created_at, updated_at
            FROM carts
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to find cart for user {user_id}: {err:?}");
            RepositoryError::from(err)
        })
    }

    async fn find_items(&self, cart_id: Uuid) -> Result<Vec<CartItemModel>, RepositoryError> {
        sqlx::query_as::<_, CartItemModel>(
            r#"
            SELECT id, cart_id, book_id, quantity, created_at, updated_at
            FROM cart_items
            WHERE cart_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(cart_id)
        .fetch_all(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to list items of cart {cart_id}: {err:?}");
            RepositoryError::from(err)
        })
    }
}
