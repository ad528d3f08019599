use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use movie_catalog_api::auth::{AdminCredentials, TokenService};
use movie_catalog_api::config::AppConfig;
use movie_catalog_api::database::{DatabaseManager, PgCatalogRepository};
use movie_catalog_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("movie_catalog_api=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();
    tracing::info!("Starting movie catalog API in {:?} mode", config.environment);

    let manager = DatabaseManager::connect_lazy(&config.database)?;
    let catalog = Arc::new(PgCatalogRepository::new(manager.pool().clone()));
    let tokens = TokenService::from_config(&config.security)?;
    let credentials = AdminCredentials::from_config(&config.security)?;

    let bind_addr = format!("{}:{}", config.api.host, config.api.port);
    let state = AppState::new(config, catalog, tokens, credentials);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    manager.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
