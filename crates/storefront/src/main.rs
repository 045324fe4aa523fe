use anyhow::{Context, Result};
use dotenv::dotenv;
use shared::{
    config::{Config, ConnectionManager},
    repository::Repositories,
    state::AppState,
    utils::{Telemetry, init_logger, run_metrics_collector},
};
use storefront::handler::AppRouter;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = config
        .otel_endpoint
        .as_deref()
        .map(|endpoint| Telemetry::init("storefront", endpoint))
        .transpose()
        .context("Failed to initialize telemetry")?;

    let _log_guard = init_logger(
        telemetry.as_ref().map(Telemetry::logger_provider),
        "storefront",
        config.log.is_dev,
        config.log.enable_file_log,
    )
    .context("Failed to initialize logger")?;

    let pool = ConnectionManager::new_pool(
        &config.database.url,
        config.database.min_connections,
        config.database.max_connections,
    )
    .await
    .context("Failed to connect to database")?;

    let state = AppState::new(Repositories::postgres(pool), &config).await;

    tokio::spawn(run_metrics_collector(state.system_metrics.clone()));

    info!("🚀 Server started successfully");

    AppRouter::serve(config.port, state)
        .await
        .context("Failed to start server")?;

    info!("Shutting down servers...");

    if let Some(telemetry) = telemetry {
        telemetry.shutdown()?;
    }

    Ok(())
}
