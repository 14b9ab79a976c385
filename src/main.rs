//! Main entry point for the question/answer board server

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use qa_board::{api, config::Settings, service::BoardService, storage::MemoryStorage, AppState};
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::load()?;
    settings.validate()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    if settings.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }

    info!("Starting question/answer board");
    info!(
        "Loaded configuration: server={}:{}",
        settings.server.host, settings.server.port
    );

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let grace = Duration::from_secs(settings.server.shutdown_grace_secs);

    // Wire storage and the domain service
    let storage = Arc::new(MemoryStorage::new());
    let service = BoardService::new(storage.clone(), storage);

    let app_state = Arc::new(AppState { settings, service });

    // Build the router
    let app = api::routes::create_router(app_state.clone());

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    // Serve until a shutdown signal arrives, then let in-flight requests
    // drain within the configured grace period.
    let (drain_tx, drain_rx) = oneshot::channel();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(drain_tx))
        .into_future();

    tokio::select! {
        result = server => result?,
        _ = forced_shutdown(drain_rx, grace) => {
            warn!("Grace period expired, abandoning in-flight requests");
        }
    }

    // No more requests can arrive; run the storage teardown hooks.
    app_state.service.shutdown().await;

    info!("Server stopped");
    Ok(())
}

/// Wait for SIGINT or SIGTERM, then start the drain phase
async fn shutdown_signal(drain_started: oneshot::Sender<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining in-flight requests");
    let _ = drain_started.send(());
}

/// Bound the drain phase to the configured grace period
async fn forced_shutdown(drain_started: oneshot::Receiver<()>, grace: Duration) {
    if drain_started.await.is_ok() {
        tokio::time::sleep(grace).await;
    } else {
        // The server finished without a signal; nothing to bound.
        std::future::pending::<()>().await;
    }
}
