use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_ROLE: &str = "user";
pub const ADMIN_ROLE: &str = "admin";

/// Identity of the caller, attached to the request by the identity middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserContext {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub role: String,
    pub email: String,
}

impl UserContext {
    pub fn new(user_id: impl Into<String>, role: Option<String>, email: Option<String>) -> Self {
        Self {
            user_id: user_id.into(),
            role: role
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_ROLE.to_string()),
            email: email.unwrap_or_default(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}
