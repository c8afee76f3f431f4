//! Error responses for API handlers

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use jtour_common::Error;

/// API errors, rendered as `{"error": message}`
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        match e {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(e: Error) -> StatusCode {
        ApiError::from(e).into_response().status()
    }

    #[test]
    fn test_library_errors_map_to_status() {
        assert_eq!(status_of(Error::NotFound("city".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(Error::InvalidInput("rating".into())), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(Error::Config("bad".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk");
        assert_eq!(status_of(Error::Io(io)), StatusCode::INTERNAL_SERVER_ERROR);
        let json = serde_json::from_str::<u32>("x").unwrap_err();
        assert_eq!(status_of(Error::Json(json)), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
