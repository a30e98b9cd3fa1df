use std::net::{Ipv4Addr, SocketAddr};

// ─── Server ──────────────────────────────────────────────────────

/// Fixed listen port. There is no runtime override.
pub const PORT: u16 = 8080;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "sum_metrics=info,tower_http=info";

// ─── Metrics ─────────────────────────────────────────────────────

/// Bucket boundaries for `http_request_duration_ms` (milliseconds).
pub const DURATION_BUCKETS_MS: &[f64] = &[
    1.0, 2.5, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1_000.0, 2_500.0,
    5_000.0, 10_000.0,
];

/// HdrHistogram range for the latency tracker: 1 μs → 60 s, 3 significant figures
pub const HIST_LOW_US: u64 = 1;
pub const HIST_HIGH_US: u64 = 60_000_000;
pub const HIST_SIGFIG: u8 = 3;

/// Compiled-in server settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, PORT)),
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binds_all_interfaces_on_8080() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn duration_buckets_are_strictly_increasing() {
        assert!(DURATION_BUCKETS_MS.windows(2).all(|w| w[0] < w[1]));
    }
}
