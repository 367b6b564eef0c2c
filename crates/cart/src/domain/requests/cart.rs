use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookIdRequest {
    #[serde(default, rename = "bookId")]
    #[validate(length(min = 1, message = "Book ID is required"))]
    pub book_id: String,
}

/// `userId` is checked by the service, after the service token.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ClearCartRequest {
    #[serde(default, rename = "userId")]
    pub user_id: String,
}
