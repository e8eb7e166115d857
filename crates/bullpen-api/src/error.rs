use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use bullpen_core::CoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The backing filesystem could not be read; callers treat every agent
    /// as offline until the next poll.
    #[error("status unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::CardNotFound(id) => ApiError::NotFound(format!("card {id}")),
            CoreError::NotFound(path) => ApiError::NotFound(path),
            CoreError::Denied(path) => ApiError::Forbidden(path),
            CoreError::Corrupt(msg) => ApiError::Internal(msg),
            err @ CoreError::Io { .. } => ApiError::Unavailable(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_errors_map_to_the_right_tier() {
        let err: ApiError = CoreError::CardNotFound("c1".to_string()).into();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err: ApiError = CoreError::Denied("../etc".to_string()).into();
        assert!(matches!(err, ApiError::Forbidden(_)));

        let err: ApiError = CoreError::Io {
            path: "/gone".into(),
            source: std::io::Error::other("mount lost"),
        }
        .into();
        assert!(matches!(err, ApiError::Unavailable(_)));
    }
}
