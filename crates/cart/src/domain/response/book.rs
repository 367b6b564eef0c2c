use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const MISSING_BOOK_TITLE: &str = "Book not found";

/// A catalog record as returned by the book-service. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl BookResponse {
    /// Stand-in for a line whose book could not be looked up.
    pub fn missing(book_id: &str) -> Self {
        Self {
            id: book_id.to_string(),
            title: MISSING_BOOK_TITLE.to_string(),
            author: None,
            price: None,
            publication_year: None,
            description: None,
            image_url: None,
            category: None,
        }
    }
}
