use crate::model::{OrderItem as OrderItemModel, OrderRecord};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemResponse {
    pub book_id: String,
    pub title: String,
    pub quantity: i32,
    pub price: f64,
}

impl From<OrderItemModel> for OrderItemResponse {
    fn from(item: OrderItemModel) -> Self {
        Self {
            book_id: item.book_id,
            title: item.title,
            quantity: item.quantity,
            price: item.price,
        }
    }
}

/// Externally visible order. Payment details are never part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub user_id: String,
    pub items: Vec<OrderItemResponse>,
    pub total_price: f64,
    pub name: String,
    pub shipping_address: String,
    pub order_note: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<OrderRecord> for OrderResponse {
    fn from(record: OrderRecord) -> Self {
        let OrderRecord { order, items } = record;

        Self {
            id: order.id,
            user_id: order.user_id,
            items: items.into_iter().map(OrderItemResponse::from).collect(),
            total_price: order.total_price,
            name: order.name,
            shipping_address: order.shipping_address,
            order_note: order.order_note,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderCreatedResponse {
    pub message: String,
    pub order: OrderResponse,
}

impl OrderCreatedResponse {
    pub fn new(order: OrderResponse) -> Self {
        Self {
            message: "Order created successfully".into(),
            order,
        }
    }
}
