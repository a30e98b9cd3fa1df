use axum::{
    middleware as axum_mw,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::StartupError;
use crate::handlers;
use crate::metrics::export;
use crate::middleware::instrument;
use crate::AppState;

/// Builds the full Axum `Router` with all routes and middleware.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // ── Arithmetic ──────────────────────────────────────────
        .route("/sum", post(handlers::sum::sum))
        // ── Metrics ─────────────────────────────────────────────
        .route("/metrics", get(export::prometheus_text))
        .route("/stats", get(export::latency_summary))
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        // ── Outermost layer: CORS preflights are counted too ────
        .layer(axum_mw::from_fn_with_state(
            Arc::clone(&state),
            instrument::instrument,
        ))
        .with_state(state)
}

/// Bind the listener and serve until Ctrl-C.
pub async fn run(config: &ServerConfig, state: Arc<AppState>) -> Result<(), StartupError> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: config.bind_addr,
            source,
        })?;

    info!(address = %config.bind_addr, "server listening");

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("ctrl-c received, shutting down");
    }
}
