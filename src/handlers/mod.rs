pub mod sum;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

// ─── Unified error type ──────────────────────────────────────────

/// Client-caused request failures. Recovered locally as an error response.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid payload")]
    InvalidPayload,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::InvalidPayload => StatusCode::BAD_REQUEST,
        };

        // Plain text body, matching what clients of /sum already parse.
        (status, self.to_string()).into_response()
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
