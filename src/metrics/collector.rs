use std::collections::BTreeMap;
use std::time::Instant;

use hdrhistogram::Histogram;
use parking_lot::Mutex;
use serde::Serialize;

use super::percentiles::PercentileSet;
use crate::config::{HIST_HIGH_US, HIST_LOW_US, HIST_SIGFIG};

// ─── Public types ────────────────────────────────────────────────

/// Thread-safe per-endpoint latency tracker.
/// The middleware calls `record()`, `/stats` calls `snapshot()`.
pub struct LatencyTracker {
    inner: Mutex<Inner>,
}

/// Summary for a single `"METHOD route"` endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointStats {
    pub endpoint: String,
    pub requests: u64,
    /// Responses with status >= 400
    pub errors: u64,
    pub latency: PercentileSet,
}

/// Complete snapshot returned by `/stats`.
#[derive(Debug, Clone, Serialize)]
pub struct LatencySnapshot {
    pub total_requests: u64,
    pub total_errors: u64,
    pub requests_per_sec: f64,
    pub uptime_secs: f64,
    pub endpoints: Vec<EndpointStats>,
}

// ─── Internal state ──────────────────────────────────────────────

struct Inner {
    endpoints: BTreeMap<String, EndpointState>,
    total_requests: u64,
    total_errors: u64,
    started: Instant,
}

struct EndpointState {
    hist: Option<Histogram<u64>>,
    requests: u64,
    errors: u64,
}

// ─── LatencyTracker impl ─────────────────────────────────────────

impl LatencyTracker {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                endpoints: BTreeMap::new(),
                total_requests: 0,
                total_errors: 0,
                started: Instant::now(),
            }),
        }
    }

    /// Record one completed request.
    pub fn record(&self, endpoint: &str, elapsed_us: u64, is_error: bool) {
        let mut inner = self.inner.lock();

        inner.total_requests += 1;
        if is_error {
            inner.total_errors += 1;
        }

        let state = inner
            .endpoints
            .entry(endpoint.to_owned())
            .or_insert_with(EndpointState::new);
        state.requests += 1;
        if is_error {
            state.errors += 1;
        }
        // Clamp into the trackable range; out-of-range values still count.
        if let Some(hist) = state.hist.as_mut() {
            let _ = hist.record(elapsed_us.clamp(HIST_LOW_US, HIST_HIGH_US));
        }
    }

    /// Produce a read-only snapshot, endpoints sorted by name.
    pub fn snapshot(&self) -> LatencySnapshot {
        let inner = self.inner.lock();
        let uptime_secs = inner.started.elapsed().as_secs_f64();
        let requests_per_sec = if uptime_secs > 0.0 {
            inner.total_requests as f64 / uptime_secs
        } else {
            0.0
        };

        LatencySnapshot {
            total_requests: inner.total_requests,
            total_errors: inner.total_errors,
            requests_per_sec,
            uptime_secs,
            endpoints: inner
                .endpoints
                .iter()
                .map(|(name, state)| EndpointStats {
                    endpoint: name.clone(),
                    requests: state.requests,
                    errors: state.errors,
                    latency: state
                        .hist
                        .as_ref()
                        .map(PercentileSet::from_histogram)
                        .unwrap_or_default(),
                })
                .collect(),
        }
    }
}

impl Default for LatencyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl EndpointState {
    fn new() -> Self {
        Self {
            // Bounds are compile-time constants; `None` only if they are invalid.
            hist: Histogram::<u64>::new_with_bounds(HIST_LOW_US, HIST_HIGH_US, HIST_SIGFIG).ok(),
            requests: 0,
            errors: 0,
        }
    }
}
