use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry,
    TextEncoder,
};

use crate::config::DURATION_BUCKETS_MS;

/// Prometheus series for HTTP traffic.
///
/// Built once at startup and shared through `AppState`. Each instance owns
/// its own `Registry`, so tests get isolated counters.
pub struct MetricsRegistry {
    registry: Registry,
    requests: IntCounterVec,
    duration_ms: HistogramVec,
}

impl MetricsRegistry {
    /// Create a fresh registry and register both series into it.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::with_registry(Registry::new())
    }

    /// Register both series into an existing registry.
    ///
    /// Returns `prometheus::Error::AlreadyReg` if the series were already
    /// registered there.
    pub fn with_registry(registry: Registry) -> Result<Self, prometheus::Error> {
        let requests = IntCounterVec::new(
            Opts::new(
                "http_request_counter",
                "Number of HTTP requests processed, labeled by status code, method, and path.",
            ),
            &["code", "method", "path"],
        )?;

        let duration_ms = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_ms",
                "Histogram of the duration of HTTP requests processed, in milliseconds.",
            )
            .buckets(DURATION_BUCKETS_MS.to_vec()),
            &["method", "path"],
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(duration_ms.clone()))?;

        Ok(Self {
            registry,
            requests,
            duration_ms,
        })
    }

    /// Count one completed request.
    pub fn increment(&self, code: &str, method: &str, path: &str) {
        self.requests.with_label_values(&[code, method, path]).inc();
    }

    /// Record one request duration in milliseconds.
    pub fn observe(&self, method: &str, path: &str, duration_ms: f64) {
        self.duration_ms
            .with_label_values(&[method, path])
            .observe(duration_ms);
    }

    /// Current counter value for a label combination (0 if never seen).
    pub fn request_count(&self, code: &str, method: &str, path: &str) -> u64 {
        self.requests
            .get_metric_with_label_values(&[code, method, path])
            .map(|c| c.get())
            .unwrap_or(0)
    }

    /// Number of observations the histogram holds for (method, path).
    pub fn duration_samples(&self, method: &str, path: &str) -> u64 {
        self.duration_ms
            .get_metric_with_label_values(&[method, path])
            .map(|h| h.get_sample_count())
            .unwrap_or(0)
    }

    /// Encode every registered family in the text exposition format.
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn increment_counts_per_label_set() {
        let m = MetricsRegistry::new().unwrap();
        m.increment("200", "POST", "/sum");
        m.increment("200", "POST", "/sum");
        m.increment("400", "POST", "/sum");

        assert_eq!(m.request_count("200", "POST", "/sum"), 2);
        assert_eq!(m.request_count("400", "POST", "/sum"), 1);
        assert_eq!(m.request_count("200", "GET", "/sum"), 0);
    }

    #[test]
    fn observe_adds_one_sample_per_call() {
        let m = MetricsRegistry::new().unwrap();
        m.observe("POST", "/sum", 0.4);
        m.observe("POST", "/sum", 12.0);

        assert_eq!(m.duration_samples("POST", "/sum"), 2);
        assert_eq!(m.duration_samples("GET", "/metrics"), 0);
    }

    #[test]
    fn double_registration_is_rejected() {
        let registry = Registry::new();
        MetricsRegistry::with_registry(registry.clone()).unwrap();

        let err = MetricsRegistry::with_registry(registry).err().unwrap();
        assert!(matches!(err, prometheus::Error::AlreadyReg));
    }

    #[test]
    fn instances_do_not_share_series() {
        let a = MetricsRegistry::new().unwrap();
        let b = MetricsRegistry::new().unwrap();
        a.increment("200", "POST", "/sum");

        assert_eq!(b.request_count("200", "POST", "/sum"), 0);
    }

    #[test]
    fn render_uses_text_exposition_format() {
        let m = MetricsRegistry::new().unwrap();
        m.increment("200", "POST", "/sum");
        m.observe("POST", "/sum", 3.0);

        let text = m.render().unwrap();
        assert!(text.contains("# TYPE http_request_counter counter"));
        assert!(text.contains(
            r#"http_request_counter{code="200",method="POST",path="/sum"} 1"#
        ));
        assert!(text.contains("# TYPE http_request_duration_ms histogram"));
        assert!(text.contains(
            r#"http_request_duration_ms_bucket{method="POST",path="/sum",le="5"} 1"#
        ));
        assert!(text.contains(
            r#"http_request_duration_ms_count{method="POST",path="/sum"} 1"#
        ));
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        let m = Arc::new(MetricsRegistry::new().unwrap());
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let m = Arc::clone(&m);
                std::thread::spawn(move || {
                    for _ in 0..1_000 {
                        m.increment("200", "POST", "/sum");
                        m.observe("POST", "/sum", 1.0);
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }

        assert_eq!(m.request_count("200", "POST", "/sum"), 8_000);
        assert_eq!(m.duration_samples("POST", "/sum"), 8_000);
    }
}
