//! Newsstand HTTP Gateway binary.

use std::sync::Arc;

use clap::Parser;
use newsstand_gateway::{create_router, AppState, Args, GatewayConfig, MySqlExecutor};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "newsstand_gateway=info,newsstand_core=info".into()),
        )
        .init();

    // Parse command line args
    let args = Args::parse();
    let config = GatewayConfig::from(&args);

    info!(
        listen = %config.listen_addr,
        pool_max_connections = config.pool_max_connections,
        query_timeout_ms = config.query_timeout.as_millis(),
        house_cache_max_entries = ?config.house_cache_max_entries,
        "Starting Newsstand Gateway"
    );

    if config.pool_max_connections == 0 {
        anyhow::bail!("pool_max_connections must be at least 1");
    }

    let executor = MySqlExecutor::connect_lazy(&config)?;
    let state = AppState::new(Arc::new(executor), config.clone());

    // Create router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("Listening on {}", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
