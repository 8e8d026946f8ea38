//! # Web API Error Types
//!
//! Error types for the web API and their HTTP response conversions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::error::AuditError;

/// Web API errors with HTTP status code mappings
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Resource not found")]
    NotFound,

    #[error("Invalid request: {message}")]
    BadRequest { message: String },

    #[error("Service temporarily unavailable")]
    ServiceUnavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Database operation failed: {operation}")]
    DatabaseError { operation: String },

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn database_error(operation: impl Into<String>) -> Self {
        Self::DatabaseError {
            operation: operation.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Timeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::DatabaseError { .. } | ApiError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (error_code, message) = match &self {
            ApiError::NotFound => ("NOT_FOUND", "Resource not found"),
            ApiError::BadRequest { message } => ("BAD_REQUEST", message.as_str()),
            ApiError::ServiceUnavailable => {
                ("SERVICE_UNAVAILABLE", "Service temporarily unavailable")
            }
            ApiError::Timeout => ("TIMEOUT", "Request timeout"),
            ApiError::DatabaseError { operation } => ("DATABASE_ERROR", operation.as_str()),
            ApiError::Internal => ("INTERNAL_ERROR", "Internal server error"),
        };

        let error_response = json!({
            "error": {
                "code": error_code,
                "message": message
            }
        });

        (self.status_code(), Json(error_response)).into_response()
    }
}

/// Client errors keep their message; server-side detail stays in the logs
impl From<AuditError> for ApiError {
    fn from(err: AuditError) -> Self {
        match err {
            AuditError::InvalidInput(message) => ApiError::BadRequest { message },
            AuditError::DatabaseError(_) => ApiError::database_error("Database operation failed"),
            AuditError::ConfigurationError(_) | AuditError::Internal(_) => ApiError::Internal,
        }
    }
}

/// Result type alias for web API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let api: ApiError = AuditError::InvalidInput("agent_id is required".to_string()).into();
        assert_eq!(api.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(api, ApiError::bad_request("agent_id is required"));
    }

    #[test]
    fn test_database_detail_is_not_exposed() {
        let api: ApiError =
            AuditError::DatabaseError("relation audit_tasks does not exist".to_string()).into();
        assert_eq!(api.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!api.to_string().contains("audit_tasks"));
    }
}
