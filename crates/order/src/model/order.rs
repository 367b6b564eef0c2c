use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::errors::ServiceError;
use sqlx::FromRow;
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Order row without the payment columns, which are never read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub user_id: String,
    pub total_price: f64,
    pub name: String,
    pub shipping_address: String,
    pub order_note: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub position: i32,
    pub book_id: String,
    pub title: String,
    pub quantity: i32,
    pub price: f64,
}

/// An order together with its line items, in position order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Success,
    Fail,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Success => "success",
            OrderStatus::Fail => "fail",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "success" => Ok(OrderStatus::Success),
            "fail" => Ok(OrderStatus::Fail),
            _ => Err(ServiceError::validation(
                "Invalid status. Must be pending, success, or fail",
            )),
        }
    }
}
