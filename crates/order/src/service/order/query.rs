use crate::{
    abstract_trait::order::{DynOrderQueryRepository, OrderQueryServiceTrait},
    domain::response::OrderResponse,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, OperationTracer},
};
use tracing::info;

#[derive(Clone)]
pub struct OrderQueryService {
    query: DynOrderQueryRepository,
    tracer: OperationTracer,
}

impl OrderQueryService {
    pub fn new(query: DynOrderQueryRepository, registry: &mut Registry) -> Self {
        Self {
            query,
            tracer: OperationTracer::new("order-query-service", registry),
        }
    }
}

#[async_trait]
impl OrderQueryServiceTrait for OrderQueryService {
    async fn list_for_user(&self, user_id: &str) -> Result<Vec<OrderResponse>, ServiceError> {
        info!("📦 Listing orders for user {user_id}");

        let tracing_ctx = self.tracer.start_tracing(
            "list_for_user",
            vec![KeyValue::new("user_id", user_id.to_string())],
        );

        match self.query.find_by_user(user_id).await {
            Ok(records) => {
                let orders: Vec<OrderResponse> =
                    records.into_iter().map(OrderResponse::from).collect();
                self.tracer.complete_tracing_success(
                    &tracing_ctx,
                    Method::Get,
                    &format!("Found {} order(s) for user {user_id}", orders.len()),
                );
                Ok(orders)
            }
            Err(e) => {
                self.tracer.complete_tracing_error(
                    &tracing_ctx,
                    Method::Get,
                    &format!("Failed to list orders for user {user_id}: {e}"),
                );
                Err(ServiceError::from(e))
            }
        }
    }

    async fn list_all(&self) -> Result<Vec<OrderResponse>, ServiceError> {
        info!("📦 Listing all orders");

        let tracing_ctx = self.tracer.start_tracing("list_all", vec![]);

        match self.query.find_all().await {
            Ok(records) => {
                let orders: Vec<OrderResponse> =
                    records.into_iter().map(OrderResponse::from).collect();
                self.tracer.complete_tracing_success(
                    &tracing_ctx,
                    Method::Get,
                    &format!("Found {} order(s)", orders.len()),
                );
                Ok(orders)
            }
            Err(e) => {
                self.tracer.complete_tracing_error(
                    &tracing_ctx,
                    Method::Get,
                    &format!("Failed to list all orders: {e}"),
                );
                Err(ServiceError::from(e))
            }
        }
    }
}
