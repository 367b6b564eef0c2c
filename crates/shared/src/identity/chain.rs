use crate::{
    abstract_trait::{DynIdentityResolver, DynJwtService, IdentityResolverTrait},
    domain::UserContext,
    errors::ServiceError,
    identity::{BearerTokenResolver, ForwardedHeadersResolver},
};
use axum::http::HeaderMap;
use std::sync::Arc;

/// Ordered list of resolvers. The first one that recognises the request decides.
#[derive(Clone)]
pub struct IdentityChain {
    resolvers: Vec<DynIdentityResolver>,
}

impl IdentityChain {
    pub fn new(resolvers: Vec<DynIdentityResolver>) -> Self {
        Self { resolvers }
    }

    /// Forwarded gateway headers first, then a verified bearer token.
    pub fn standard(jwt: DynJwtService) -> Self {
        Self::new(vec![
            Arc::new(ForwardedHeadersResolver::new()),
            Arc::new(BearerTokenResolver::new(jwt)),
        ])
    }
}

impl IdentityResolverTrait for IdentityChain {
    fn resolve(&self, headers: &HeaderMap) -> Result<Option<UserContext>, ServiceError> {
        for resolver in &self.resolvers {
            if let Some(ctx) = resolver.resolve(headers)? {
                return Ok(Some(ctx));
            }
        }

        Err(ServiceError::MissingToken)
    }
}
