use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    /// Only populated by debug builds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}
