// API error taxonomy.
//
// Three classes cross the web boundary:
//   Validation  — client-caused, detected before any I/O, always 400.
//   Unavailable — transport-caused (DB or backend unreachable), 503.
//   Upstream    — the third-party API returned a structured error; its
//                 status code is propagated as-is.
//
// Handlers for the four local read endpoints (mentions/analytics/sentiment/
// platforms) catch Unavailable themselves and serve deterministic mock data
// instead — that decision lives in the handler, not here and not in the
// query layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed request parameter. Never retried.
    #[error("{0}")]
    Validation(String),

    /// Database or backend service unreachable.
    #[error("{0}")]
    Unavailable(String),

    /// The upstream API returned a non-2xx response.
    #[error("upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::Validation(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        ApiError::Unavailable(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let err = ApiError::validation("days out of range");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unavailable_maps_to_503() {
        let err = ApiError::unavailable("backend not running");
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn upstream_propagates_status() {
        let err = ApiError::Upstream {
            status: 429,
            message: "rate limited".into(),
        };
        assert_eq!(err.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn bogus_upstream_status_falls_back_to_502() {
        let err = ApiError::Upstream {
            status: 0,
            message: "???".into(),
        };
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }
}
