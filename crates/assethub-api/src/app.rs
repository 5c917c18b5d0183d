//! Application builder: wires router, middleware and state into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::trace::TraceLayer;

use assethub_core::config::{AppConfig, CorsConfig};
use assethub_core::error::AppError;
use assethub_service::Services;
use assethub_store::JsonStore;
use assethub_worker::{CycleRunner, NotificationScheduler};

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState, cors_config: &CorsConfig) -> Router {
    build_router(state)
        .layer(build_compression_layer())
        .layer(build_cors_layer(cors_config))
        .layer(TraceLayer::new_for_http())
}

/// Runs the AssetHub server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting AssetHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Open the document store ──────────────────────────
    let store = Arc::new(JsonStore::open(&config.storage).await?);
    store.load().await?;

    // ── Step 2: Wire services ────────────────────────────────────
    let services = Services::from_config(Arc::clone(&store), &config.notification)?;

    // ── Step 3: Start the reminder scheduler ─────────────────────
    let mut scheduler = if config.scheduler.enabled {
        let runner = Arc::new(CycleRunner::new(Arc::clone(&services.notifications)));
        let mut scheduler = NotificationScheduler::new(runner, config.scheduler.clone()).await?;
        scheduler.register().await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Notification scheduler disabled; relying on the cron endpoint");
        None
    };

    // ── Step 4: Build and start HTTP server ──────────────────────
    let state = AppState::new(Arc::new(config.clone()), store, services);
    let app = build_app(state, &config.server.cors);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("AssetHub listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 5: Stop background work ─────────────────────────────
    if let Some(scheduler) = scheduler.as_mut() {
        let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
        match tokio::time::timeout(grace, scheduler.shutdown()).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "Scheduler shutdown failed"),
            Err(_) => tracing::warn!("Scheduler did not stop within the grace period"),
        }
    }

    tracing::info!("AssetHub server shut down gracefully");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
