use crate::{domain::UserContext, errors::ServiceError};
use axum::http::HeaderMap;
use std::sync::Arc;

pub type DynIdentityResolver = Arc<dyn IdentityResolverTrait + Send + Sync>;

/// One source of caller identity.
///
/// `Ok(None)` means the resolver found nothing it recognises on the request and the
/// next resolver in the chain should be tried. `Err` is terminal for the request.
pub trait IdentityResolverTrait: Send + Sync {
    fn resolve(&self, headers: &HeaderMap) -> Result<Option<UserContext>, ServiceError>;
}
