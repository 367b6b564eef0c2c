use serde::{Deserialize, Serialize};

/// Cart as returned by the cart-service's `GET /cart`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartResponse {
    #[serde(default, rename = "cartId", skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<String>,
    #[serde(default)]
    pub items: Vec<CartLineResponse>,
}

/// `price` is already the line total (unit price times quantity).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineResponse {
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub quantity: i32,
    #[serde(default)]
    pub price: f64,
    pub book: CartBookResponse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartBookResponse {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
}
