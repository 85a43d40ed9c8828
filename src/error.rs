//! Error types for the caching proxy
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Proxy Error Enum ==
/// Unified error type for the caching proxy.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Upstream reported the resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream API failed or returned an unexpected status
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Key-value store failure
    #[error("Cache store error: {0}")]
    Store(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// Replaces the message of a `NotFound` error, leaving other variants untouched.
    ///
    /// Lets handlers name the missing id or search term without the upstream
    /// client knowing about request context.
    pub fn describe_not_found(self, message: impl Into<String>) -> Self {
        match self {
            ProxyError::NotFound(_) => ProxyError::NotFound(message.into()),
            other => other,
        }
    }

    /// Returns true for the `NotFound` variant.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProxyError::NotFound(_))
    }
}

// == Conversions ==
impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProxyError::Upstream(format!("request timed out: {}", err))
        } else {
            ProxyError::Upstream(err.to_string())
        }
    }
}

impl From<redis::RedisError> for ProxyError {
    fn from(err: redis::RedisError) -> Self {
        ProxyError::Store(err.to_string())
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(err: serde_json::Error) -> Self {
        ProxyError::Internal(format!("JSON error: {}", err))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = match &self {
            ProxyError::NotFound(_) => StatusCode::NOT_FOUND,
            ProxyError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ProxyError::Upstream(_) | ProxyError::Store(_) | ProxyError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the caching proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ProxyError::NotFound("Character with ID 9999 not found".into()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_request_maps_to_400() {
        let response = ProxyError::InvalidRequest("bad id".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_failures_map_to_500() {
        for err in [
            ProxyError::Upstream("boom".into()),
            ProxyError::Store("connection refused".into()),
            ProxyError::Internal("oops".into()),
        ] {
            assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn test_describe_not_found_only_rewrites_not_found() {
        let err = ProxyError::NotFound("404".into()).describe_not_found("Character with ID 7 not found");
        assert_eq!(err.to_string(), "Character with ID 7 not found");

        let err = ProxyError::Store("down".into()).describe_not_found("ignored");
        assert!(matches!(err, ProxyError::Store(_)));
        assert!(!err.is_not_found());
    }
}
