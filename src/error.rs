use std::net::SocketAddr;

use thiserror::Error;

/// Failures that stop the process before (or while) serving.
///
/// None of these are recoverable: `main` surfaces them and exits non-zero.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to register metric series: {0}")]
    Metrics(#[from] prometheus::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server exited with error: {0}")]
    Serve(#[source] std::io::Error),
}
