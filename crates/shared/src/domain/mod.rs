mod identity;
mod responses;

pub use self::identity::{ADMIN_ROLE, DEFAULT_ROLE, UserContext};
pub use self::responses::{HealthResponse, MessageResponse, ServiceInfoResponse};
