use crate::{config::Claims, errors::ServiceError};
use std::sync::Arc;

pub type DynJwtService = Arc<dyn JwtServiceTrait + Send + Sync>;

pub trait JwtServiceTrait: Send + Sync + std::fmt::Debug {
    /// Verifies signature and expiry, returning the decoded claims.
    fn verify_token(&self, token: &str) -> Result<Claims, ServiceError>;
}
