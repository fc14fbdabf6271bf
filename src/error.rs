//! Error types with HTTP status code mapping.
//!
//! [`PulseError`] is the central error type for both the publisher and the
//! subscriber. Publisher-side variants map to an HTTP status and a
//! structured JSON error response; subscriber-side variants surface through
//! the event sink's error callback.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Structured JSON error response body.
///
/// All publisher error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 1001,
///     "message": "origin not allowed: https://evil.example",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Error enum covering both sides of the push channel.
#[derive(Debug, thiserror::Error)]
pub enum PulseError {
    /// Request carried an `Origin` header that does not match the one
    /// allowed origin. Rejected before any event-stream headers are sent.
    #[error("origin not allowed: {0}")]
    OriginNotAllowed(String),

    /// Subscriber-side transport failure (connect refused, broken stream).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with something other than an event stream.
    #[error("unexpected content type: {0}")]
    NotAnEventStream(String),

    /// An event frame's payload was not valid `{"time": ...}` JSON.
    #[error("malformed event payload: {0}")]
    MalformedEvent(#[from] serde_json::Error),

    /// The publisher ended the stream; the subscription is terminal.
    #[error("event stream closed by publisher")]
    StreamClosed,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PulseError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::OriginNotAllowed(_) => 1001,
            Self::Transport(_) => 2001,
            Self::NotAnEventStream(_) => 2002,
            Self::MalformedEvent(_) => 2003,
            Self::StreamClosed => 2004,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::OriginNotAllowed(_) => StatusCode::FORBIDDEN,
            Self::Transport(_)
            | Self::NotAnEventStream(_)
            | Self::MalformedEvent(_)
            | Self::StreamClosed
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PulseError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn origin_rejection_is_forbidden() {
        let err = PulseError::OriginNotAllowed("https://evil.example".to_string());
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.error_code(), 1001);
    }

    #[test]
    fn internal_maps_to_500() {
        let err = PulseError::Internal("boom".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_body_serializes_without_null_details() {
        let body = ErrorResponse {
            error: ErrorBody {
                code: 1001,
                message: "origin not allowed".to_string(),
                details: None,
            },
        };
        let json = serde_json::to_string(&body).unwrap_or_default();
        assert!(!json.contains("details"));
        assert!(json.contains("1001"));
    }
}
