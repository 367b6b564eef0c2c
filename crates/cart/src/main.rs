use anyhow::{Context, Result};
use cart::{config::myconfig::Config, handler::AppRouter, state::AppState};
use shared::{
    config::{ConnectionManager, ConnectionPool},
    utils::{Telemetry, init_logger},
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = Telemetry::new("cart-service", config.common.otel_endpoint.clone());
    let providers = telemetry.init().context("Failed to initialize telemetry")?;

    let _log_guard = init_logger(
        &providers.logger,
        "cart-service",
        config.common.is_dev,
        config.common.enable_file_log,
    )?;

    let db_pool = ConnectionManager::new_pool(
        &config.common.database_url,
        config.common.db_min_conn,
        config.common.db_max_conn,
    )
    .await
    .context("Failed to initialize database pool")?;

    if config.common.run_migrations {
        run_migrations(&db_pool)
            .await
            .context("Failed to run database migrations")?;
    }

    let state = AppState::new(db_pool, &config).context("Failed to create AppState")?;

    info!("✅ Application setup completed successfully.");

    AppRouter::serve(config.common.port, state)
        .await
        .context("Failed to start server")?;

    info!("🛑 Shutting down cart-service...");

    if let Err(e) = providers.shutdown() {
        error!("Failed to shutdown telemetry: {e}");
    }

    Ok(())
}

async fn run_migrations(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("✅ Migrations applied");
    Ok(())
}
