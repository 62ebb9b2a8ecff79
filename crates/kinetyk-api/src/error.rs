//! Error → HTTP response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kinetyk_core::Error;
use serde_json::json;

/// Wrapper turning a [`kinetyk_core::Error`] into an HTTP response.
///
/// Classification: missing parameter → 400, missing id → 404, everything
/// else → 500. Bodies are always `{"error": message}`.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_bad_request() {
            StatusCode::BAD_REQUEST
        } else if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            tracing::error!(error = %self.0, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let body = Json(json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

// ============================================================================
// Tests
// ============================================================================
