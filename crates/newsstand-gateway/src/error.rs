//! Error handling for the gateway.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use newsstand_core::{MappingError, StoreError};
use serde::Serialize;

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Request parameters could not be mapped to a query.
    BadRequest(String),
    /// Unknown route or response format.
    NotFound(String),
    /// The market database failed.
    Store(StoreError),
    /// Internal server error.
    Internal(String),
}

/// Error response body.
#[derive(Serialize)]
pub struct ErrorResponse {
    /// Error flag.
    pub error: bool,
    /// Error code.
    pub code: String,
    /// Error message.
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            AppError::Store(StoreError::Timeout) => (
                StatusCode::GATEWAY_TIMEOUT,
                "STORE_TIMEOUT",
                StoreError::Timeout.to_string(),
            ),
            AppError::Store(err) => (StatusCode::BAD_GATEWAY, "STORE_ERROR", err.to_string()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        if status.is_server_error() {
            tracing::warn!(code, %message, "request failed");
        }

        let body = ErrorResponse {
            error: true,
            code: code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<newsstand_core::Error> for AppError {
    fn from(err: newsstand_core::Error) -> Self {
        match err {
            newsstand_core::Error::Mapping(err) => err.into(),
            newsstand_core::Error::Store(err) => AppError::Store(err),
        }
    }
}

impl From<MappingError> for AppError {
    fn from(err: MappingError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: impl Into<AppError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_mapping_errors_are_bad_request() {
        let malformed = MappingError::MalformedDescriptor {
            field: "house".into(),
            reason: "missing column `name`".into(),
        };

        assert_eq!(status_of(malformed.clone()), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(newsstand_core::Error::Mapping(malformed)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(MappingError::UnknownField("faction".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_store_errors_map_to_gateway_statuses() {
        assert_eq!(
            status_of(newsstand_core::Error::Store(StoreError::Timeout)),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            status_of(newsstand_core::Error::Store(StoreError::Query("syntax".into()))),
            StatusCode::BAD_GATEWAY
        );
    }
}
