use crate::{
    config::myconfig::Config,
    di::{DependenciesInject, DependenciesInjectDeps},
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::{DynIdentityResolver, DynJwtService},
    config::{ConnectionPool, JwtConfig},
    identity::IdentityChain,
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub identity: DynIdentityResolver,
    pub registry: Arc<Registry>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("deps", &self.di_container)
            .field("registry", &self.registry)
            .finish()
    }
}

impl AppState {
    pub fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let mut registry = Registry::default();

        let jwt = Arc::new(JwtConfig::new(&config.common.jwt_secret)) as DynJwtService;
        let identity = Arc::new(IdentityChain::standard(jwt)) as DynIdentityResolver;

        let deps = DependenciesInjectDeps {
            pool,
            http_client: config.common.http_client.clone(),
            book_service_url: config.book_service_url.clone(),
            service_token: config.common.service_token.clone(),
        };

        let di_container = DependenciesInject::new(deps, &mut registry)
            .context("Failed to initialize dependency injection container")?;

        Ok(Self {
            di_container,
            identity,
            registry: Arc::new(registry),
        })
    }
}
