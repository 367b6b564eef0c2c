mod cart;

use crate::state::AppState;
use anyhow::{Context, Result};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Extension, Request, State},
    middleware,
    response::IntoResponse,
    routing::get,
};
use shared::{
    domain::{HealthResponse, ServiceInfoResponse, UserContext},
    middleware::optional_identity,
    utils::{render_metrics, shutdown_signal},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::info;
use utoipa::{Modify, OpenApi, openapi::security::SecurityScheme};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

pub use self::cart::{SERVICE_TOKEN_HEADER, cart_routes};

pub const SERVICE_NAME: &str = "cart-service";

#[derive(OpenApi)]
#[openapi(
    paths(
        cart::get_cart,
        cart::add_to_cart,
        cart::remove_one_from_cart,
        cart::remove_cart_item,
        cart::clear_cart,
        health,
        service_info,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Cart", description = "Cart endpoints"),
        (name = "System", description = "Health and service info"),
    )
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(utoipa::openapi::security::Http::new(
                    utoipa::openapi::security::HttpAuthScheme::Bearer,
                )),
            );
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse::up())
}

#[utoipa::path(
    get,
    path = "/",
    tag = "System",
    responses((status = 200, description = "Service info; includes userId for identified callers", body = ServiceInfoResponse))
)]
pub async fn service_info(req: Request) -> impl IntoResponse {
    Json(ServiceInfoResponse {
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "UP".to_string(),
        user_id: req
            .extensions()
            .get::<UserContext>()
            .map(|ctx| ctx.user_id.clone()),
    })
}

pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    render_metrics(&state.registry)
}

pub struct AppRouter;

impl AppRouter {
    pub fn build(shared_state: Arc<AppState>) -> Router {
        let system_router = OpenApiRouter::new()
            .route("/health", get(health))
            .merge(
                OpenApiRouter::new()
                    .route("/", get(service_info))
                    .route_layer(middleware::from_fn(optional_identity))
                    .layer(Extension(shared_state.identity.clone())),
            );

        let api_router = OpenApiRouter::with_openapi(ApiDoc::openapi())
            .route("/metrics", get(metrics_handler))
            .with_state(shared_state.clone())
            .merge(system_router)
            .merge(cart_routes(shared_state));

        let router_with_layers = api_router
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(1024 * 1024));

        let (app_router, api) = router_with_layers.split_for_parts();

        app_router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
    }

    pub async fn serve(port: u16, app_state: AppState) -> Result<()> {
        let app = Self::build(Arc::new(app_state));

        let addr = format!("0.0.0.0:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        info!("🚀 {SERVICE_NAME} running on http://{}", listener.local_addr()?);
        info!("📖 Swagger UI: http://localhost:{port}/swagger-ui");
        info!("📊 Metrics: http://localhost:{port}/metrics");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("HTTP server failed")?;

        Ok(())
    }
}
