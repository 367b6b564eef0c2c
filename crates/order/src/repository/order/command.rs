use crate::{
    abstract_trait::order::OrderCommandRepositoryTrait,
    domain::requests::CreateOrderRecordRequest,
    model::{Order as OrderModel, OrderItem as OrderItemModel, OrderRecord, OrderStatus},
    repository::order::{ORDER_COLUMNS, load_items},
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};
use uuid::Uuid;

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_order(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<OrderRecord, RepositoryError> {
        let mut tx = self.db.begin().await.map_err(RepositoryError::from)?;

        let sql = format!(
            r#"
            INSERT INTO orders (
                id, user_id, total_price, name, shipping_address, order_note,
                status, card_number, cvv, expired_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {ORDER_COLUMNS}
            "#
        );

        let order = sqlx::query_as::<_, OrderModel>(&sql)
            .bind(Uuid::new_v4())
            .bind(&req.user_id)
            .bind(req.total_price)
            .bind(&req.name)
            .bind(&req.shipping_address)
            .bind(&req.order_note)
            .bind(OrderStatus::Pending.as_str())
            .bind(&req.payment.card_number)
            .bind(&req.payment.cvv)
            .bind(&req.payment.expired_date)
            .fetch_one(&mut *tx)
            .await
            .map_err(|err| {
                error!("❌ Failed to create order for user {}: {err:?}", req.user_id);
                RepositoryError::from(err)
            })?;

        let mut items = Vec::with_capacity(req.items.len());
        for (position, item) in req.items.iter().enumerate() {
            let position = i32::try_from(position)
                .map_err(|_| RepositoryError::Custom("too many order items".into()))?;

            let row = sqlx::query_as::<_, OrderItemModel>(
                r#"
                INSERT INTO order_items (id, order_id, position, book_id, title, quantity, price)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, order_id, position, book_id, title, quantity, price
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(order.id)
            .bind(position)
            .bind(&item.book_id)
            .bind(&item.title)
            .bind(item.quantity)
            .bind(item.price)
            .fetch_one(&mut *tx)
            .await
            .map_err(|err| {
                error!("❌ Failed to add item {} to order {}: {err:?}", item.book_id, order.id);
                RepositoryError::from(err)
            })?;

            items.push(row);
        }

        tx.commit().await.map_err(|err| {
            error!("❌ Failed to commit order {}: {err:?}", order.id);
            RepositoryError::from(err)
        })?;

        info!(
            "✅ Created order {} for user {} with {} item(s)",
            order.id,
            order.user_id,
            items.len()
        );

        Ok(OrderRecord { order, items })
    }

    async fn update_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<OrderRecord>, RepositoryError> {
        let sql = format!(
            r#"
            UPDATE orders
            SET status = $2,
                updated_at = now()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        );

        let Some(order) = sqlx::query_as::<_, OrderModel>(&sql)
            .bind(order_id)
            .bind(status.as_str())
            .fetch_optional(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to update status of order {order_id}: {err:?}");
                RepositoryError::from(err)
            })?
        else {
            return Ok(None);
        };

        let items = load_items(&self.db, &[order.id]).await?;

        info!("✅ Order {order_id} is now {status}");
        Ok(Some(OrderRecord { order, items }))
    }
}
