use crate::{
    abstract_trait::DynIdentityResolver,
    domain::{ADMIN_ROLE, UserContext},
    errors::{HttpError, ServiceError},
};
use axum::{
    Extension,
    body::Body,
    http::Request,
    middleware::Next,
    response::IntoResponse,
};
use tracing::debug;

/// Rejects the request with 401 unless an identity can be resolved.
pub async fn require_identity(
    Extension(resolver): Extension<DynIdentityResolver>,
    mut req: Request<Body>,
    next: Next,
) -> Result<impl IntoResponse, HttpError> {
    let ctx = resolver
        .resolve(req.headers())?
        .ok_or(ServiceError::MissingToken)?;

    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

/// Attaches an identity when one resolves; anonymous callers pass through.
pub async fn optional_identity(
    Extension(resolver): Extension<DynIdentityResolver>,
    mut req: Request<Body>,
    next: Next,
) -> impl IntoResponse {
    match resolver.resolve(req.headers()) {
        Ok(Some(ctx)) => {
            req.extensions_mut().insert(ctx);
        }
        Ok(None) => {}
        Err(e) => debug!("Proceeding without identity: {e}"),
    }

    next.run(req).await
}

pub fn require_role(ctx: &UserContext, role: &str) -> Result<(), ServiceError> {
    if ctx.role == role {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(format!("Requires role '{role}'")))
    }
}

/// Must run after [`require_identity`].
pub async fn require_admin(req: Request<Body>, next: Next) -> Result<impl IntoResponse, HttpError> {
    let ctx = req
        .extensions()
        .get::<UserContext>()
        .ok_or(ServiceError::MissingToken)?;

    require_role(ctx, ADMIN_ROLE)?;

    Ok(next.run(req).await)
}
