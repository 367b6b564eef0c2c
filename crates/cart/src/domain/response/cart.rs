use crate::{domain::response::BookResponse, model::CartItem};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartLineResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub quantity: i32,
    /// `book.price * quantity`, or 0 when the book could not be found.
    pub price: f64,
    pub book: BookResponse,
}

impl CartLineResponse {
    pub fn resolve(item: &CartItem, book: Option<BookResponse>) -> Self {
        match book {
            Some(book) => Self {
                id: item.id,
                quantity: item.quantity,
                price: book.price.unwrap_or_default() * f64::from(item.quantity),
                book,
            },
            None => Self {
                id: item.id,
                quantity: item.quantity,
                price: 0.0,
                book: BookResponse::missing(&item.book_id),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartResponse {
    #[serde(rename = "cartId", skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<Uuid>,
    pub items: Vec<CartLineResponse>,
}

impl CartResponse {
    pub fn empty() -> Self {
        Self {
            cart_id: None,
            items: Vec::new(),
        }
    }
}
