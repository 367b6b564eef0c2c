mod command;
mod query;

pub use self::command::OrderCommandRepository;
pub use self::query::OrderQueryRepository;

use crate::model::{Order as OrderModel, OrderItem as OrderItemModel, OrderRecord};
use shared::errors::RepositoryError;
use sqlx::postgres::PgExecutor;
use std::collections::HashMap;
use uuid::Uuid;

pub(crate) const ORDER_COLUMNS: &str = "id, user_id, total_price, name, shipping_address, \
     order_note, status, created_at, updated_at";

pub(crate) async fn load_items<'e, E>(
    executor: E,
    order_ids: &[Uuid],
) -> Result<Vec<OrderItemModel>, RepositoryError>
where
    E: PgExecutor<'e>,
{
    if order_ids.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query_as::<_, OrderItemModel>(
        r#"
        SELECT id, order_id, position, book_id, title, quantity, price
        FROM order_items
        WHERE order_id = ANY($1)
        ORDER BY order_id, position
        "#,
    )
    .bind(order_ids)
    .fetch_all(executor)
    .await
    .map_err(RepositoryError::from)
}

/// Pairs each order with its items, keeping the order of `orders`.
pub(crate) fn attach_items(orders: Vec<OrderModel>, items: Vec<OrderItemModel>) -> Vec<OrderRecord> {
    let mut by_order: HashMap<Uuid, Vec<OrderItemModel>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id).or_default().push(item);
    }

    orders
        .into_iter()
        .map(|order| {
            let mut items = by_order.remove(&order.id).unwrap_or_default();
            items.sort_by_key(|item| item.position);
            OrderRecord { order, items }
        })
        .collect()
}
