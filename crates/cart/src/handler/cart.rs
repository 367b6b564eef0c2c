use crate::{
    abstract_trait::cart::{DynCartCommandService, DynCartQueryService},
    domain::{
        requests::{BookIdRequest, ClearCartRequest},
        response::CartResponse,
    },
    state::AppState,
};
use axum::{
    Json,
    body::Bytes,
    extract::{Extension, Path},
    http::{HeaderMap, StatusCode},
    middleware,
    response::IntoResponse,
    routing::{delete, get, post},
};
use shared::{
    domain::{MessageResponse, UserContext},
    errors::{ErrorResponse, HttpError, ServiceError},
    middleware::{SimpleValidatedJson, require_identity},
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;
use uuid::Uuid;

pub const SERVICE_TOKEN_HEADER: &str = "x-service-token";

#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "Cart",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's cart with resolved books", body = CartResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn get_cart(
    Extension(service): Extension<DynCartQueryService>,
    Extension(user): Extension<UserContext>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.get_cart(&user.user_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/cart/add",
    tag = "Cart",
    security(("bearer_auth" = [])),
    request_body = BookIdRequest,
    responses(
        (status = 200, description = "Book added; updated cart", body = CartResponse),
        (status = 400, description = "Book ID is required", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Book does not exist", body = ErrorResponse)
    )
)]
pub async fn add_to_cart(
    Extension(service): Extension<DynCartCommandService>,
    Extension(user): Extension<UserContext>,
    SimpleValidatedJson(body): SimpleValidatedJson<BookIdRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.add_one(&user.user_id, &body.book_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/cart/remove",
    tag = "Cart",
    security(("bearer_auth" = [])),
    request_body = BookIdRequest,
    responses(
        (status = 200, description = "One unit removed; updated cart", body = CartResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Cart not found or item not in cart", body = ErrorResponse)
    )
)]
pub async fn remove_one_from_cart(
    Extension(service): Extension<DynCartCommandService>,
    Extension(user): Extension<UserContext>,
    SimpleValidatedJson(body): SimpleValidatedJson<BookIdRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = service.remove_one(&user.user_id, &body.book_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    delete,
    path = "/api/cart/item/{itemId}",
    tag = "Cart",
    security(("bearer_auth" = [])),
    params(("itemId" = String, Path, description = "Cart line ID")),
    responses(
        (status = 200, description = "Line deleted; remaining cart", body = CartResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse)
    )
)]
pub async fn remove_cart_item(
    Extension(service): Extension<DynCartCommandService>,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse, HttpError> {
    let item_id = Uuid::parse_str(&item_id)
        .map_err(|_| ServiceError::not_found("Item not found"))?;

    let response = service.remove_line(item_id).await?;
    Ok((StatusCode::OK, Json(response)))
}

/// Service-to-service only. The token is checked before the body is looked at.
#[utoipa::path(
    delete,
    path = "/api/cart/clear",
    tag = "Cart",
    params(("X-Service-Token" = String, Header, description = "Shared service token")),
    request_body = ClearCartRequest,
    responses(
        (status = 200, description = "Cart cleared", body = MessageResponse),
        (status = 400, description = "userId is required", body = ErrorResponse),
        (status = 403, description = "Invalid service token", body = ErrorResponse),
        (status = 404, description = "Cart not found", body = ErrorResponse)
    )
)]
pub async fn clear_cart(
    Extension(service): Extension<DynCartCommandService>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, HttpError> {
    let credential = headers
        .get(SERVICE_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    let request = serde_json::from_slice::<ClearCartRequest>(&body).unwrap_or_default();

    let response = service.clear_all(&request.user_id, credential).await?;
    Ok((StatusCode::OK, Json(response)))
}

pub fn cart_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let user_routes = OpenApiRouter::new()
        .route("/api/cart", get(get_cart))
        .route("/api/cart/add", post(add_to_cart))
        .route("/api/cart/remove", post(remove_one_from_cart))
        .route("/api/cart/item/{itemId}", delete(remove_cart_item))
        .route_layer(middleware::from_fn(require_identity));

    let service_routes = OpenApiRouter::new().route("/api/cart/clear", delete(clear_cart));

    user_routes
        .merge(service_routes)
        .layer(Extension(app_state.di_container.cart_query.clone()))
        .layer(Extension(app_state.di_container.cart_command.clone()))
        .layer(Extension(app_state.identity.clone()))
}
