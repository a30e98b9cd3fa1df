use axum::http::{Response, StatusCode};

/// Side channel that remembers the status a handler produced.
///
/// Responses pass through [`StatusRecorder::forward`] untouched; only the
/// first status seen is kept. Defaults to `200 OK` when nothing was set.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatusRecorder {
    captured: Option<StatusCode>,
}

impl StatusRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `code` unless a status was already captured.
    pub fn write_status(&mut self, code: StatusCode) {
        if self.captured.is_none() {
            self.captured = Some(code);
        }
    }

    /// Capture the response status and hand the response back unchanged.
    pub fn forward<B>(&mut self, response: Response<B>) -> Response<B> {
        self.write_status(response.status());
        response
    }

    pub fn status(&self) -> StatusCode {
        self.captured.unwrap_or(StatusCode::OK)
    }
}
