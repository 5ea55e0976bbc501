use anyhow::{Context, Result};

use patient_analytics::api::{self, ApiContext};
use patient_analytics::config::{self, ServiceConfig};

#[tokio::main]
async fn main() -> Result<()> {
    patient_analytics::init_tracing();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let service_config = ServiceConfig::from_env().context("invalid service configuration")?;
    tracing::debug!(config = ?service_config, "Configuration loaded");

    let ctx = ApiContext::from_config(&service_config);
    let server = api::start_server(ctx, service_config.bind_addr)
        .await
        .map_err(anyhow::Error::msg)
        .context("failed to start API server")?;

    tracing::info!(addr = %server.session.server_addr, "Listening");

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    server.stop().await;
    tracing::info!("{} shutdown complete", config::APP_NAME);
    Ok(())
}
