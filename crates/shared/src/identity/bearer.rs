use crate::{
    abstract_trait::{DynJwtService, IdentityResolverTrait},
    domain::UserContext,
    errors::ServiceError,
};
use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::CookieJar;

/// Verifies a signed token from `Authorization: Bearer` or the `token` cookie.
#[derive(Debug, Clone)]
pub struct BearerTokenResolver {
    jwt: DynJwtService,
}

impl BearerTokenResolver {
    pub fn new(jwt: DynJwtService) -> Self {
        Self { jwt }
    }

    fn extract_token(headers: &HeaderMap) -> Option<String> {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|auth_header| auth_header.to_str().ok())
            .and_then(|auth_value| auth_value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_owned)
            .or_else(|| {
                CookieJar::from_headers(headers)
                    .get("token")
                    .map(|cookie| cookie.value().to_string())
                    .filter(|token| !token.is_empty())
            })
    }
}

impl IdentityResolverTrait for BearerTokenResolver {
    fn resolve(&self, headers: &HeaderMap) -> Result<Option<UserContext>, ServiceError> {
        let Some(token) = Self::extract_token(headers) else {
            return Ok(None);
        };

        let claims = self.jwt.verify_token(&token)?;

        let user_id = claims
            .subject()
            .map(str::to_owned)
            .ok_or(ServiceError::InvalidToken)?;

        Ok(Some(UserContext::new(user_id, claims.role, claims.email)))
    }
}
