//! newsdesk server entry point.
//!
//! Loads configuration, opens the article store, warms the news cache and
//! serves the site over HTTP until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use newsdesk_core::{AppConfig, NewsDb};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

mod cookies;
mod error;
mod handler;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    tracing::info!(db_path = %config.db_path.display(), "opening article store");
    let db = NewsDb::open(&config.db_path).await.context("opening article store")?;

    let address = config.bind_address();
    let state = handler::AppState::new(db, config);

    match state.cache.refresh().await {
        Ok(count) => tracing::info!(count, "news cache warmed"),
        Err(e) => tracing::warn!("starting with an empty news cache: {e}"),
    }

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("binding to {address}"))?;
    tracing::info!("newsdesk listening on {address}");

    axum::serve(listener, handler::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("newsdesk stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received terminate signal, shutting down"),
    }
}
