use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use prometheus::TEXT_FORMAT;
use std::sync::Arc;
use tracing::error;

use super::collector::LatencySnapshot;
use crate::AppState;

// ─── GET /metrics ────────────────────────────────────────────────
/// Prometheus scrape endpoint (text exposition format).

pub async fn prometheus_text(State(state): State<Arc<AppState>>) -> Response {
    match state.metrics.render() {
        Ok(body) => ([(header::CONTENT_TYPE, TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            error!(error = %e, "failed to encode metrics");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

// ─── GET /stats ──────────────────────────────────────────────────
/// Per-endpoint latency percentiles and error counts as JSON.

pub async fn latency_summary(
    State(state): State<Arc<AppState>>,
) -> Json<LatencySnapshot> {
    Json(state.latency.snapshot())
}
