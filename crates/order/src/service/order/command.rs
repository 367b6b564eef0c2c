use crate::{
    abstract_trait::order::{DynOrderCommandRepository, OrderCommandServiceTrait},
    domain::response::OrderResponse,
    model::OrderStatus,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, OperationTracer},
};
use tracing::info;
use uuid::Uuid;

#[derive(Clone)]
pub struct OrderCommandService {
    command: DynOrderCommandRepository,
    tracer: OperationTracer,
}

impl OrderCommandService {
    pub fn new(command: DynOrderCommandRepository, registry: &mut Registry) -> Self {
        Self {
            command,
            tracer: OperationTracer::new("order-command-service", registry),
        }
    }

    // Status is checked before the id, so a bad status on an unknown order is a 400.
    async fn update_status_inner(
        &self,
        order_id: &str,
        status: Option<String>,
    ) -> Result<OrderResponse, ServiceError> {
        let status = status
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ServiceError::validation("Status is required"))?
            .parse::<OrderStatus>()?;

        let order_id = Uuid::parse_str(order_id)
            .map_err(|_| ServiceError::not_found("Order not found"))?;

        let record = self
            .command
            .update_status(order_id, status)
            .await?
            .ok_or_else(|| ServiceError::not_found("Order not found"))?;

        Ok(OrderResponse::from(record))
    }
}

#[async_trait]
impl OrderCommandServiceTrait for OrderCommandService {
    async fn update_status(
        &self,
        order_id: &str,
        status: Option<String>,
    ) -> Result<OrderResponse, ServiceError> {
        info!("✏️ Updating status of order {order_id} to {status:?}");

        let tracing_ctx = self.tracer.start_tracing(
            "update_status",
            vec![
                KeyValue::new("order_id", order_id.to_string()),
                KeyValue::new("status", status.clone().unwrap_or_default()),
            ],
        );

        let result = self.update_status_inner(order_id, status).await;

        match &result {
            Ok(order) => self.tracer.complete_tracing_success(
                &tracing_ctx,
                Method::Patch,
                &format!("Order {} is now {}", order.id, order.status),
            ),
            Err(e) => self.tracer.complete_tracing_error(
                &tracing_ctx,
                Method::Patch,
                &format!("Failed to update order {order_id}: {e}"),
            ),
        }

        result
    }
}
