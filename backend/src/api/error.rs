use super::messages::ErrorBody;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::warn;

/// Transport-level failures. Domain failures travel in 200 payloads instead.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("malformed request: {0}")]
    MalformedInput(String),

    #[error("route not found")]
    NotFound,
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedInput(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MalformedInput(detail) => {
                warn!(detail, "Rejected malformed request");
                (StatusCode::BAD_REQUEST, "Bad request")
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found"),
        };

        let body = ErrorBody {
            error: message.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
