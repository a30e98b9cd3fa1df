use axum::{
    extract::{MatchedPath, Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use super::recorder::StatusRecorder;
use crate::AppState;

/// Label used for requests that matched no route.
pub const UNMATCHED_ROUTE: &str = "unmatched";

/// Per-request bookkeeping owned by one middleware invocation.
struct RequestRecord {
    method: Method,
    route: String,
    started: Instant,
}

impl RequestRecord {
    /// The `path` label is the matched route pattern, never the raw URI,
    /// so query strings and path parameters cannot blow up cardinality.
    fn start(req: &Request) -> Self {
        let route = req
            .extensions()
            .get::<MatchedPath>()
            .map(|p| p.as_str().to_owned())
            .unwrap_or_else(|| UNMATCHED_ROUTE.to_owned());

        Self {
            method: req.method().clone(),
            route,
            started: Instant::now(),
        }
    }
}

/// Axum middleware that logs every request and records its status and
/// duration into the shared registry.
///
/// Must be installed with `Router::layer` so that `MatchedPath` is already
/// resolved when it runs.
pub async fn instrument(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    // ── START ───────────────────────────────────────────────────
    let record = RequestRecord::start(&req);
    info!(method = %record.method, uri = %req.uri(), "request received");

    // ── DELEGATED ───────────────────────────────────────────────
    let mut recorder = StatusRecorder::new();
    let response = recorder.forward(next.run(req).await);

    // ── RECORDED ────────────────────────────────────────────────
    let elapsed = record.started.elapsed();
    let status = recorder.status();
    let method = record.method.as_str();
    let elapsed_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);

    state.metrics.increment(status.as_str(), method, &record.route);
    state
        .metrics
        .observe(method, &record.route, elapsed.as_secs_f64() * 1_000.0);
    state.latency.record(
        &format!("{method} {}", record.route),
        elapsed_us,
        status.is_client_error() || status.is_server_error(),
    );

    debug!(
        status = status.as_u16(),
        method,
        route = %record.route,
        elapsed_us,
        "request recorded"
    );

    response
}
