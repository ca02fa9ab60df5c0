//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use nightlight_app::override_queue::OverrideError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`OverrideError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(OverrideError);

impl From<OverrideError> for ApiError {
    fn from(err: OverrideError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            OverrideError::QueueFull | OverrideError::LoopStopped => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        };
        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
