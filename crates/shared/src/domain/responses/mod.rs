mod api;

pub use self::api::{HealthResponse, MessageResponse, ServiceInfoResponse};
