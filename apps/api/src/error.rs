//! Error handling for the Libris API
//!
//! This module provides a unified error type using thiserror, with HTTP
//! status code mapping via Axum's IntoResponse trait and GraphQL error
//! extensions carrying a stable code plus the offending input value.

use async_graphql::ErrorExtensions;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error response body for REST routes
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for client-side handling
    pub code: &'static str,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Main API error type
#[derive(Error, Debug)]
pub enum ApiError {
    /// Operation requires an authenticated context
    #[error("not authenticated")]
    Unauthorized,

    /// Token is malformed, expired, or signed with the wrong key
    #[error("invalid authentication token: {0}")]
    InvalidToken(String),

    /// Login failed; never reveals which half of the credential was wrong
    #[error("invalid username or password")]
    InvalidCredentials,

    /// Request validation failed
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Referenced entity absent
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Uniqueness violation on a key field
    #[error("{resource_type} already exists: {id}")]
    Conflict {
        resource_type: &'static str,
        id: String,
    },

    /// Persistence failed while saving the given input
    #[error("saving {input} failed: {source}")]
    Store {
        input: String,
        #[source]
        source: sqlx::Error,
    },

    /// Database query failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// JWT encoding/decoding error
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal server error (catch-all for unexpected errors)
    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized | Self::InvalidToken(_) | Self::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Store { .. }
            | Self::Database(_)
            | Self::Jwt(_)
            | Self::Configuration(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code string for client-side handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
            Self::Store { .. } => "STORE_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Jwt(_) => "JWT_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// The offending input value, when the error carries one
    pub fn invalid_input(&self) -> Option<&str> {
        match self {
            Self::NotFound { id, .. } | Self::Conflict { id, .. } => Some(id),
            Self::Store { input, .. } => Some(input),
            _ => None,
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type,
            id: id.into(),
        }
    }

    /// Create a conflict error for a specific resource
    pub fn conflict(resource_type: &'static str, id: impl Into<String>) -> Self {
        Self::Conflict {
            resource_type,
            id: id.into(),
        }
    }

    /// Wrap a failed insert/update, keeping the offending input attached.
    /// Unique-constraint violations surface as conflicts.
    pub fn store(resource_type: &'static str, input: impl Into<String>, source: sqlx::Error) -> Self {
        match source {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => Self::Conflict {
                resource_type,
                id: input.into(),
            },
            source => Self::Store {
                input: input.into(),
                source,
            },
        }
    }

    /// Log the error with severity based on status class
    pub fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Server error occurred"
            );
        } else if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Authorization error"
            );
        } else {
            tracing::debug!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Client error"
            );
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status_code();
        let error_response = ErrorResponse {
            code: self.error_code(),
            message: self.to_string(),
            details: None,
        };

        (status, Json(error_response)).into_response()
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        self.log();

        let code = self.error_code();
        let invalid = self.invalid_input().map(str::to_owned);
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| {
            e.set("code", code);
            if let Some(input) = &invalid {
                e.set("invalidArgs", input.as_str());
            }
        })
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api_err) => api_err,
            Err(err) => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::not_found("author", "Tolkien").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::conflict("book", "The Hobbit").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::ValidationError("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::Unauthorized.error_code(), "UNAUTHORIZED");
        assert_eq!(
            ApiError::conflict("author", "Tolkien").error_code(),
            "CONFLICT"
        );
        assert_eq!(
            ApiError::InvalidCredentials.error_code(),
            "INVALID_CREDENTIALS"
        );
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::not_found("author", "Unknown Name");
        assert_eq!(err.to_string(), "author not found: Unknown Name");
    }

    #[test]
    fn test_invalid_input_attached() {
        assert_eq!(
            ApiError::conflict("book", "The Hobbit").invalid_input(),
            Some("The Hobbit")
        );
        assert_eq!(ApiError::Unauthorized.invalid_input(), None);
    }

    #[test]
    fn test_store_wraps_non_unique_errors() {
        let err = ApiError::store("book", "The Hobbit", sqlx::Error::RowNotFound);
        assert_eq!(err.error_code(), "STORE_ERROR");
        assert_eq!(err.invalid_input(), Some("The Hobbit"));
    }
}
