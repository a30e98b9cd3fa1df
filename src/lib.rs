pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod server;

use std::sync::Arc;

/// Shared application state available to every handler via `State<Arc<AppState>>`.
pub struct AppState {
    /// Prometheus series scraped from `/metrics`.
    pub metrics: metrics::MetricsRegistry,

    /// Per-endpoint latency percentiles served from `/stats`.
    pub latency: metrics::LatencyTracker,
}

impl AppState {
    /// Registers every metric series. Fails on duplicate registration.
    pub fn new() -> Result<Arc<Self>, error::StartupError> {
        Ok(Arc::new(Self {
            metrics: metrics::MetricsRegistry::new()?,
            latency: metrics::LatencyTracker::new(),
        }))
    }
}
