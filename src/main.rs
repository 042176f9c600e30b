use anyhow::Context;
use tracing_subscriber::EnvFilter;

use asset_desk::app::{router, AppState};
use asset_desk::config;
use asset_desk::database::DatabaseManager;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("asset_desk=info,tower_http=info")),
        )
        .init();

    let config = config::config().clone();
    config.validate().context("invalid configuration")?;
    tracing::info!("Starting Asset Desk in {:?} mode", config.environment);
    if asset_desk::is_development!() {
        tracing::warn!("Development mode: session cookies are not Secure");
    }

    let pool = DatabaseManager::pool(&config.database)?.clone();
    if config.database.run_migrations {
        DatabaseManager::migrate(&pool).await?;
    }

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Asset Desk listening on http://{}", bind_addr);

    let app = router(AppState::new(pool.clone(), config));
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    DatabaseManager::close(&pool).await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
