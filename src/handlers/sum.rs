use axum::{body::Bytes, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AppError;

// ─── Request / response types ────────────────────────────────────

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SumRequest {
    pub a: i64,
    pub b: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SumResponse {
    pub result: i64,
}

impl SumRequest {
    /// Decode a raw body. Both fields must be present as integers.
    pub fn decode(body: &[u8]) -> Result<Self, AppError> {
        serde_json::from_slice(body).map_err(|e| {
            debug!(error = %e, "rejecting /sum payload");
            AppError::InvalidPayload
        })
    }

    /// Overflowing the result range is treated as a bad payload.
    pub fn total(self) -> Result<i64, AppError> {
        self.a.checked_add(self.b).ok_or(AppError::InvalidPayload)
    }
}

// ─── POST /sum ───────────────────────────────────────────────────
/// Takes the raw body so a missing or odd `Content-Type` still reaches
/// decoding and is reported as `invalid payload` rather than a 415.

pub async fn sum(body: Bytes) -> Result<Json<SumResponse>, AppError> {
    let req = SumRequest::decode(&body)?;
    Ok(Json(SumResponse {
        result: req.total()?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_two_integers() {
        let req = SumRequest::decode(br#"{"a": 2, "b": 3}"#).unwrap();
        assert_eq!(req.total().unwrap(), 5);
    }

    #[test]
    fn negative_values_add() {
        let req = SumRequest::decode(br#"{"a": -7, "b": 3}"#).unwrap();
        assert_eq!(req.total().unwrap(), -4);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let req = SumRequest::decode(br#"{"a": 1, "b": 1, "c": "x"}"#).unwrap();
        assert_eq!(req.total().unwrap(), 2);
    }

    #[test]
    fn rejects_bad_bodies() {
        let bodies: [&[u8]; 6] = [
            b"",
            b"not json",
            br#"{"a": "x"}"#,
            br#"{"a": 1}"#,
            br#"{}"#,
            br#"{"a": 1.5, "b": 2}"#,
        ];
        for body in bodies {
            assert!(
                matches!(SumRequest::decode(body), Err(AppError::InvalidPayload)),
                "accepted {:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn overflow_is_rejected() {
        let req = SumRequest { a: i64::MAX, b: 1 };
        assert!(matches!(req.total(), Err(AppError::InvalidPayload)));
    }
}
