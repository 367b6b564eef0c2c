use crate::{
    abstract_trait::cart_client::CartCaller, domain::requests::CheckoutRequest,
    domain::response::OrderResponse,
};
use async_trait::async_trait;
use mockall::automock;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynCheckoutService = Arc<dyn CheckoutServiceTrait + Send + Sync>;

#[automock]
#[async_trait]
pub trait CheckoutServiceTrait {
    /// Turns the caller's cart into a pending order, then clears the cart.
    async fn checkout(
        &self,
        caller: &CartCaller,
        request: &CheckoutRequest,
    ) -> Result<OrderResponse, ServiceError>;
}
