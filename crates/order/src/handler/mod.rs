mod order;

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

pub use self::order::order_routes;

pub const SERVICE_NAME: &str = "order-service";

#[derive(OpenApi)]
#[openapi(
    paths(
        order::checkout,
        order::get_my_orders,
        order::get_all_orders,
        order::update_order_status,
        health,
        service_info,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Order", description = "Checkout and order endpoints"),
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
            .merge(order_routes(shared_state));

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{
            checkout::MockCheckoutServiceTrait,
            order::{MockOrderCommandServiceTrait, MockOrderQueryServiceTrait},
        },
        di::DependenciesInject,
    };
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
    };
    use prometheus_client::registry::Registry;
    use serde_json::Value;
    use shared::{config::JwtConfig, identity::IdentityChain};
    use tower::ServiceExt;

    fn app() -> Router {
        AppRouter::build(Arc::new(AppState {
            di_container: DependenciesInject {
                checkout: Arc::new(MockCheckoutServiceTrait::new()),
                order_query: Arc::new(MockOrderQueryServiceTrait::new()),
                order_command: Arc::new(MockOrderCommandServiceTrait::new()),
            },
            identity: Arc::new(IdentityChain::standard(Arc::new(JwtConfig::new("secret")))),
            registry: Arc::new(Registry::default()),
            admin_require_role: false,
        }))
    }

    async fn get_json(req: HttpRequest<Body>) -> (StatusCode, Value) {
        let res = app().oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn health_reports_up() {
        let req = HttpRequest::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = get_json(req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "UP");
    }

    #[tokio::test]
    async fn service_info_is_public_and_echoes_identity() {
        let anonymous = HttpRequest::builder().uri("/").body(Body::empty()).unwrap();
        let (status, body) = get_json(anonymous).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["service"], SERVICE_NAME);
        assert!(body.get("userId").is_none());

        let identified = HttpRequest::builder()
            .uri("/")
            .header("x-user-id", "u-5")
            .body(Body::empty())
            .unwrap();
        let (_, body) = get_json(identified).await;
        assert_eq!(body["userId"], "u-5");
    }

    #[tokio::test]
    async fn metrics_are_exposed() {
        let req = HttpRequest::builder().uri("/metrics").body(Body::empty()).unwrap();
        let res = app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn openapi_lists_order_routes() {
        let req = HttpRequest::builder()
            .uri("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap();
        let (status, body) = get_json(req).await;

        assert_eq!(status, StatusCode::OK);
        for path in ["/api/orders", "/api/orders/all", "/api/orders/{id}/status"] {
            assert!(body["paths"].get(path).is_some(), "missing {path}");
        }
    }
}
