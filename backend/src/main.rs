//! Solar Forecast Server - binary entry point

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use solar_forecast::{create_app, external::OpenMeteoClient, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "solar_forecast_server=debug,solar_forecast=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load().context("failed to load configuration")?;

    tracing::info!("Starting Solar Forecast Server");
    tracing::info!("Environment: {}", config.environment);

    // The client owns the response cache for the whole process
    let client = OpenMeteoClient::from_config(&config.open_meteo)
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    tracing::info!(
        "Open-Meteo endpoint {} (cache {}s, {} retries)",
        config.open_meteo.base_url,
        config.open_meteo.cache_ttl_secs,
        config.open_meteo.max_retries
    );

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("invalid server host/port")?;

    // Create application state
    let state = AppState::new(config, Arc::new(client));

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
