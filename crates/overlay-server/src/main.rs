//! UGC stats overlay server binary.
//!
//! Run with:
//! ```bash
//! overlay-server --source catalog --default-asset-id 116103195460500
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use overlay_cache::SnapshotCache;
use overlay_server::{AppState, Config, router};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "overlay_server=debug,overlay_cache=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::parse();

    info!("Starting UGC overlay server");
    info!("  Listen: {}", config.listen);
    info!("  Source: {:?}", config.source);
    info!("  Default asset: {}", config.default_asset_id);
    info!("  Refresh interval: {:?}", config.refresh_interval());

    let source = config
        .build_source()
        .context("failed to build upstream HTTP client")?;
    let cache = SnapshotCache::with_refresh_interval(source, config.refresh_interval());
    let state = AppState::new(Arc::new(cache), config.settings());

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;

    info!("Listening on http://{}", config.listen);
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
