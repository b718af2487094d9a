//! Error handling for the Ironbale API
//!
//! Every handler returns [`ApiResult`]; [`ApiError`] carries the HTTP status,
//! a stable error code and, for authentication failures, the page the client
//! should send the operator to.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::{DateTime, Utc};
use ironbale_backoffice::BackofficeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

/// Where unauthenticated dashboard requests are sent.
pub const LOGIN_REDIRECT: &str = "/login";

#[derive(Error, Debug)]
pub enum ApiError {
    /// 400
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    /// 401, with a login redirect
    #[error("Authentication required: {message}")]
    Authentication { message: String },

    /// 404
    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// 503
    #[error("Storage error: {message}")]
    StorageError { message: String },

    /// 500
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::StorageError { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "VALIDATION_ERROR",
            ApiError::Authentication { .. } => "AUTHENTICATION_ERROR",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::StorageError { .. } => "STORAGE_ERROR",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn to_response(&self) -> ApiErrorResponse {
        let details = match self {
            ApiError::Validation { field: Some(field), .. } => {
                Some(serde_json::json!({ "field": field }))
            }
            _ => None,
        };

        ApiErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details,
            redirect: matches!(self, ApiError::Authentication { .. })
                .then(|| LOGIN_REDIRECT.to_string()),
            timestamp: Utc::now(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into(), field: None }
    }

    pub fn validation_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication { message: message.into() }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound { resource: resource.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    #[schema(example = "VALIDATION_ERROR")]
    pub code: String,

    #[schema(example = "Validation error: email must contain '@'")]
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub details: Option<serde_json::Value>,

    /// Set on 401 responses
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "/login")]
    pub redirect: Option<String>,

    pub timestamp: DateTime<Utc>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(code = self.error_code(), error = %self, "Request failed");
        }
        (status, Json(self.to_response())).into_response()
    }
}

impl From<BackofficeError> for ApiError {
    fn from(err: BackofficeError) -> Self {
        match err {
            BackofficeError::InvalidCredentials { .. } => {
                ApiError::authentication("invalid email or API key")
            }
            BackofficeError::SessionNotFound => ApiError::authentication("no active session"),
            BackofficeError::SessionExpired { expired_at } => {
                ApiError::authentication(format!("session expired at {expired_at}"))
            }
            BackofficeError::Validation { message, field } => ApiError::Validation { message, field },
            BackofficeError::NotFound { resource, id } => {
                ApiError::not_found(format!("{resource} {id}"))
            }
            err @ (BackofficeError::Storage { .. } | BackofficeError::Database { .. }) => {
                ApiError::StorageError { message: err.to_string() }
            }
            err @ BackofficeError::SessionLifetime { .. } => ApiError::internal(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(serde_err) = err.downcast_ref::<serde_json::Error>() {
            return ApiError::validation(format!("JSON error: {serde_err}"));
        }
        ApiError::internal(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
