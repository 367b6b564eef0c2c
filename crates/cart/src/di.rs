use crate::{
    abstract_trait::{
        cart::{DynCartCommandService, DynCartQueryService},
        catalog::DynCatalogClient,
    },
    http_client::CatalogHttpClient,
    repository::{CartCommandRepository, CartQueryRepository},
    service::{CartCommandService, CartCommandServiceDeps, CartQueryService, CartResolver},
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::config::{ConnectionPool, HttpClientConfig, ServiceToken};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub cart_query: DynCartQueryService,
    pub cart_command: DynCartCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("cart_query", &"CartQueryService")
            .field("cart_command", &"CartCommandService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub http_client: HttpClientConfig,
    pub book_service_url: String,
    pub service_token: ServiceToken,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps, registry: &mut Registry) -> Result<Self> {
        let DependenciesInjectDeps {
            pool,
            http_client,
            book_service_url,
            service_token,
        } = deps;

        let cart_query_repo = Arc::new(CartQueryRepository::new(pool.clone()));
        let cart_command_repo = Arc::new(CartCommandRepository::new(pool));

        let client = http_client
            .build_client()
            .context("Failed to build catalog HTTP client")?;
        let catalog: DynCatalogClient = Arc::new(
            CatalogHttpClient::new(client, &book_service_url)
                .context("Failed to initialize catalog client")?,
        );

        let resolver = CartResolver::new(cart_query_repo.clone(), catalog.clone());

        let cart_query = Arc::new(CartQueryService::new(
            cart_query_repo.clone(),
            resolver.clone(),
            registry,
        )) as DynCartQueryService;

        let cart_command = Arc::new(CartCommandService::new(
            CartCommandServiceDeps {
                query: cart_query_repo,
                command: cart_command_repo,
                catalog,
                resolver,
                service_token,
            },
            registry,
        )) as DynCartCommandService;

        Ok(Self {
            cart_query,
            cart_command,
        })
    }
}
