//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use subtrack_domain::error::{SubtrackError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`SubtrackError`] to an HTTP response with appropriate status code.
pub struct ApiError(SubtrackError);

impl From<SubtrackError> for ApiError {
    fn from(err: SubtrackError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            SubtrackError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            SubtrackError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            SubtrackError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
