use crate::{abstract_trait::IdentityResolverTrait, domain::UserContext, errors::ServiceError};
use axum::http::HeaderMap;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Trusts identity headers set by the gateway after it verified the caller.
#[derive(Debug, Clone, Default)]
pub struct ForwardedHeadersResolver;

impl ForwardedHeadersResolver {
    pub fn new() -> Self {
        Self
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

impl IdentityResolverTrait for ForwardedHeadersResolver {
    fn resolve(&self, headers: &HeaderMap) -> Result<Option<UserContext>, ServiceError> {
        let Some(user_id) = header_value(headers, USER_ID_HEADER) else {
            return Ok(None);
        };

        Ok(Some(UserContext::new(
            user_id,
            header_value(headers, USER_ROLE_HEADER),
            header_value(headers, USER_EMAIL_HEADER),
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn absent_header_is_not_applicable() {
        let resolved = ForwardedHeadersResolver::new()
            .resolve(&HeaderMap::new())
            .unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn defaults_role_and_email() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("u-42"));

        let ctx = ForwardedHeadersResolver::new()
            .resolve(&headers)
            .unwrap()
            .expect("identity");

        assert_eq!(ctx.user_id, "u-42");
        assert_eq!(ctx.role, "user");
        assert_eq!(ctx.email, "");
    }

    #[test]
    fn reads_all_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("u-1"));
        headers.insert(USER_ROLE_HEADER, HeaderValue::from_static("admin"));
        headers.insert(USER_EMAIL_HEADER, HeaderValue::from_static("a@b.c"));

        let ctx = ForwardedHeadersResolver::new()
            .resolve(&headers)
            .unwrap()
            .expect("identity");

        assert!(ctx.is_admin());
        assert_eq!(ctx.email, "a@b.c");
    }
}
