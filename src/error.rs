//! Error types for the retail audit core.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuditError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuditError {
    /// True for errors caused by the caller rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(self, AuditError::InvalidInput(_))
    }
}

impl From<sqlx::Error> for AuditError {
    fn from(err: sqlx::Error) -> Self {
        AuditError::DatabaseError(err.to_string())
    }
}

impl From<config::ConfigError> for AuditError {
    fn from(error: config::ConfigError) -> Self {
        AuditError::ConfigurationError(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AuditError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(AuditError::InvalidInput("agent_id".into()).is_client_error());
        assert!(!AuditError::DatabaseError("down".into()).is_client_error());
        assert!(!AuditError::Internal("boom".into()).is_client_error());
    }

    #[test]
    fn test_display_messages() {
        let err = AuditError::InvalidInput("agent_id is required".into());
        assert_eq!(err.to_string(), "Invalid input: agent_id is required");
    }
}
