use crate::{
    abstract_trait::{
        cart_client::DynCartClient,
        checkout::DynCheckoutService,
        order::{DynOrderCommandService, DynOrderQueryService},
    },
    http_client::CartHttpClient,
    repository::{OrderCommandRepository, OrderQueryRepository},
    service::{
        CheckoutLocks, CheckoutService, CheckoutServiceDeps, OrderCommandService,
        OrderQueryService,
    },
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::config::{ConnectionPool, HttpClientConfig, ServiceToken};
use std::{fmt, sync::Arc};
use tracing::info;

#[derive(Clone)]
pub struct DependenciesInject {
    pub checkout: DynCheckoutService,
    pub order_query: DynOrderQueryService,
    pub order_command: DynOrderCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("checkout", &"CheckoutService")
            .field("order_query", &"OrderQueryService")
            .field("order_command", &"OrderCommandService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub http_client: HttpClientConfig,
    pub cart_service_url: String,
    pub service_token: ServiceToken,
    pub checkout_user_lock: bool,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Result<Self> {
        let DependenciesInjectDeps {
            pool,
            http_client,
            cart_service_url,
            service_token,
            checkout_user_lock,
        } = deps;

        let order_query_repo = Arc::new(OrderQueryRepository::new(pool.clone()));
        let order_command_repo = Arc::new(OrderCommandRepository::new(pool));

        let client = http_client
            .build_client()
            .context("Failed to build cart HTTP client")?;
        let cart: DynCartClient = Arc::new(
            CartHttpClient::new(client, &cart_service_url, service_token)
                .context("Failed to initialize cart client")?,
        );

        let locks = checkout_user_lock.then(CheckoutLocks::new);
        if locks.is_none() {
            info!("🔓 Per-user checkout lock disabled");
        }

        let checkout = Arc::new(CheckoutService::new(
            CheckoutServiceDeps {
                cart,
                orders: order_command_repo.clone(),
                locks,
            },
            registry,
        )) as DynCheckoutService;

        let order_query =
            Arc::new(OrderQueryService::new(order_query_repo, registry)) as DynOrderQueryService;

        let order_command = Arc::new(OrderCommandService::new(order_command_repo, registry))
            as DynOrderCommandService;

        Ok(Self {
            checkout,
            order_query,
            order_command,
        })
    }
}
