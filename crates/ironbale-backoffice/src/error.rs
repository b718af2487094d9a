//! Error handling for back-office operations
//!
//! Every repository, storage and session operation reports a
//! [`BackofficeError`]; the HTTP layer maps each variant onto a status code.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackofficeError {
    /// Unknown operator or wrong API key
    #[error("Invalid credentials for {email}")]
    InvalidCredentials { email: String },

    /// Token does not belong to a live session
    #[error("Session not found")]
    SessionNotFound,

    /// Session outlived its TTL
    #[error("Session expired at {expired_at}")]
    SessionExpired { expired_at: DateTime<Utc> },

    /// Configured TTL pushes the expiry past what the clock can represent
    #[error("Session lifetime of {ttl_minutes} minutes is out of range")]
    SessionLifetime { ttl_minutes: i64 },

    /// Input rejected before touching storage
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    #[error("{resource} not found: {id}")]
    NotFound { resource: &'static str, id: String },

    /// Object storage failures
    #[error("Storage error: {message}")]
    Storage { message: String, path: Option<String> },

    /// Database row failures
    #[error("Database error: {message}")]
    Database { message: String, table: Option<String> },
}

impl BackofficeError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }

    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound { resource, id: id.to_string() }
    }

    pub fn storage(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage { message: message.into(), path: Some(path.into()) }
    }

    pub fn database(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Database { message: message.into(), table: Some(table.into()) }
    }

    /// Whether the error means the caller has to sign in again.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. } | Self::SessionNotFound | Self::SessionExpired { .. }
        )
    }
}

pub type BackofficeResult<T> = Result<T, BackofficeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = BackofficeError::not_found("media", "42");
        assert_eq!(err.to_string(), "media not found: 42");

        let err = BackofficeError::validation("email", "must contain '@'");
        assert_eq!(err.to_string(), "Validation error: must contain '@'");
    }

    #[test]
    fn auth_classification() {
        assert!(BackofficeError::SessionNotFound.is_auth());
        assert!(BackofficeError::SessionExpired { expired_at: Utc::now() }.is_auth());
        assert!(!BackofficeError::storage("uploads/a.png", "bucket offline").is_auth());
    }
}
