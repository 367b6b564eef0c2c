use crate::{
    abstract_trait::cart::{CartCommandRepositoryTrait, DecrementOutcome},
    model::{Cart as CartModel, CartItem as CartItemModel},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};
use uuid::Uuid;

pub struct CartCommandRepository {
    db: ConnectionPool,
}

impl CartCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CartCommandRepositoryTrait for CartCommandRepository {
    async fn get_or_create(&self, user_id: &str) -> Result<CartModel, RepositoryError> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let cart = sqlx::query_as::<_, CartModel>(
            r#"
            INSERT INTO carts (id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING id, user_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to get or create cart for user {user_id}: {err:?}");
            RepositoryError::from(err)
        })?;

        Ok(cart)
    }

    async fn increment_item(
        &self,
        cart_id: Uuid,
        book_id: &str,
    ) -> Result<CartItemModel, RepositoryError> {
        let item = sqlx::query_as::<_, CartItemModel>(
            r#"
            INSERT INTO cart_items (id, cart_id, book_id, quantity)
            VALUES ($1, $2, $3, 1)
            ON CONFLICT (cart_id, book_id)
            DO UPDATE SET quantity = cart_items.quantity + 1,
                          updated_at = now()
            RETURNING id, cart_id, book_id, quantity, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(cart_id)
        .bind(book_id)
        .fetch_one(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to add book {book_id} to cart {cart_id}: {err:?}");
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Cart {cart_id} now holds {} x book {book_id}",
            item.quantity
        );
        Ok(item)
    }

    async fn decrement_item(
        &self,
        cart_id: Uuid,
        book_id: &str,
    ) -> Result<DecrementOutcome, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let current = sqlx::query_as::<_, CartItemModel>(
            r#"
            SELECT id, cart_id, book_id, quantity, created_at, updated_at
            FROM cart_items
            WHERE cart_id = $1 AND book_id = $2
            FOR UPDATE
            "#,
        )
        .bind(cart_id)
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(RepositoryError::from)?;

        let Some(current) = current else {
            return Ok(DecrementOutcome::NotInCart);
        };

        let outcome = if current.quantity <= 1 {
            sqlx::query("DELETE FROM cart_items WHERE id = $1")
                .bind(current.id)
                .execute(&mut *tx)
                .await
                .map_err(RepositoryError::from)?;

            info!("🗑️ Removed book {book_id} from cart {cart_id}");
            DecrementOutcome::Removed
        } else {
            let item = sqlx::query_as::<_, CartItemModel>(
                r#"
                UPDATE cart_items
                SET quantity = quantity - 1,
                    updated_at = now()
                WHERE id = $1
                RETURNING id, cart_id, book_id, quantity, created_at, updated_at
                "#,
            )
            .bind(current.id)
            .fetch_one(&mut *tx)
            .await
            .map_err(RepositoryError::from)?;

            DecrementOutcome::Decremented(item)
        };

        tx.commit().await.map_err(|err| {
            error!("❌ Failed to commit decrement on cart {cart_id}: {err:?}");
            RepositoryError::from(err)
        })?;

        Ok(outcome)
    }

    async fn delete_item(&self, item_id: Uuid) -> Result<Option<CartItemModel>, RepositoryError> {
        sqlx::query_as::<_, CartItemModel>(
            r#"
            DELETE FROM cart_items
            WHERE id = $1
            RETURNING id, cart_id, book_id, quantity, created_at, updated_at
            "#,
        )
        .bind(item_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to delete cart item {item_id}: {err:?}");
            RepositoryError::from(err)
        })
    }

    async fn clear(&self, cart_id: Uuid) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1")
            .bind(cart_id)
            .execute(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to clear cart {cart_id}: {err:?}");
                RepositoryError::from(err)
            })?;

        info!(
            "🧹 Cleared {} line(s) from cart {cart_id}",
            result.rows_affected()
        );
        Ok(result.rows_affected())
    }
}
