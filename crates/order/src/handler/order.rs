use crate::{
    abstract_trait::{
        cart_client::CartCaller,
        checkout::DynCheckoutService,
        order::{DynOrderCommandService, DynOrderQueryService},
    },
    domain::{
        requests::{CheckoutRequest, UpdateStatusRequest},
        response::{OrderCreatedResponse, OrderResponse},
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
    routing::{get, patch},
};
use shared::{
    domain::UserContext,
    errors::{ErrorResponse, HttpError},
    middleware::{require_admin, require_identity},
};
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    request_body = CheckoutRequest,
    responses(
        (status = 201, description = "Order created from the caller's cart", body = OrderCreatedResponse),
        (status = 400, description = "Missing required order fields or cart is empty", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 500, description = "Cart-service unreachable or internal error", body = ErrorResponse)
    )
)]
pub async fn checkout(
    Extension(service): Extension<DynCheckoutService>,
    Extension(user): Extension<UserContext>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, HttpError> {
    // Unparseable bodies fall through to the missing-fields check.
    let request = serde_json::from_slice::<CheckoutRequest>(&body).unwrap_or_default();
    let caller = CartCaller::from_request(&user, &headers);

    let order = service.checkout(&caller, &request).await?;
    Ok((StatusCode::CREATED, Json(OrderCreatedResponse::new(order))))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Order",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller's orders, newest first", body = [OrderResponse]),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    )
)]
pub async fn get_my_orders(
    Extension(service): Extension<DynOrderQueryService>,
    Extension(user): Extension<UserContext>,
) -> Result<impl IntoResponse, HttpError> {
    let orders = service.list_for_user(&user.user_id).await?;
    Ok((StatusCode::OK, Json(orders)))
}

#[utoipa::path(
    get,
    path = "/api/orders/all",
    tag = "Order",
    responses(
        (status = 200, description = "All orders, newest first", body = [OrderResponse]),
        (status = 401, description = "Unauthorized (ADMIN_REQUIRE_ROLE only)", body = ErrorResponse),
        (status = 403, description = "Admin role required (ADMIN_REQUIRE_ROLE only)", body = ErrorResponse)
    )
)]
pub async fn get_all_orders(
    Extension(service): Extension<DynOrderQueryService>,
) -> Result<impl IntoResponse, HttpError> {
    let orders = service.list_all().await?;
    Ok((StatusCode::OK, Json(orders)))
}

#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    tag = "Order",
    params(("id" = String, Path, description = "Order ID")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Updated order", body = OrderResponse),
        (status = 400, description = "Status is missing or invalid", body = ErrorResponse),
        (status = 401, description = "Unauthorized (ADMIN_REQUIRE_ROLE only)", body = ErrorResponse),
        (status = 403, description = "Admin role required (ADMIN_REQUIRE_ROLE only)", body = ErrorResponse),
        (status = 404, description = "Order not found", body = ErrorResponse)
    )
)]
pub async fn update_order_status(
    Extension(service): Extension<DynOrderCommandService>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<impl IntoResponse, HttpError> {
    let request = serde_json::from_slice::<UpdateStatusRequest>(&body).unwrap_or_default();

    let order = service.update_status(&id, request.status_text()).await?;
    Ok((StatusCode::OK, Json(order)))
}

pub fn order_routes(app_state: Arc<AppState>) -> OpenApiRouter {
    let user_routes = OpenApiRouter::new()
        .route("/api/orders", get(get_my_orders).post(checkout))
        .route_layer(middleware::from_fn(require_identity));

    let mut admin_routes = OpenApiRouter::new()
        .route("/api/orders/all", get(get_all_orders))
        .route("/api/orders/{id}/status", patch(update_order_status));

    // Open unless the deployment opts in to role checks.
    if app_state.admin_require_role {
        admin_routes = admin_routes
            .route_layer(middleware::from_fn(require_admin))
            .route_layer(middleware::from_fn(require_identity));
    }

    user_routes
        .merge(admin_routes)
        .layer(Extension(app_state.di_container.checkout.clone()))
        .layer(Extension(app_state.di_container.order_query.clone()))
        .layer(Extension(app_state.di_container.order_command.clone()))
        .layer(Extension(app_state.identity.clone()))
}
