use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use sum_metrics::config::ServerConfig;
use sum_metrics::{server, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::default();

    // ── 1. Logging ───────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    // ── 2. Register metric series (exactly once) ─────────────────
    let state = AppState::new().context("metrics registration failed")?;

    // ── 3. Bind & serve ──────────────────────────────────────────
    server::run(&config, state)
        .await
        .context("server failed")?;

    Ok(())
}
