//! Unified error model
//! Every core error is returned to the immediate caller; this module owns
//! the single mapping from error kind to HTTP response.

use crate::auth::password::PasswordError;
use crate::token::TokenError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("Authentication failed")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Resource not found")]
    NotFound,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Token(TokenError::Expired) | AppError::Token(TokenError::Invalid) => {
                StatusCode::UNAUTHORIZED
            }
            // Maker construction failures (bad key size, encoding) are server
            // faults, not client faults
            AppError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Password(PasswordError::Mismatch) => StatusCode::UNAUTHORIZED,
            AppError::Password(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// User-facing message, with no sensitive detail.
    ///
    /// An expired token is reported as such so clients can refresh instead
    /// of re-authenticating; every other credential failure collapses into
    /// one message to avoid acting as an oracle.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Token(TokenError::Expired) => "Token has expired".to_string(),
            AppError::Token(TokenError::Invalid) => "Authentication failed".to_string(),
            AppError::Token(_) => "Internal server error".to_string(),
            AppError::Password(PasswordError::Mismatch) => "Authentication failed".to_string(),
            AppError::Password(_) => "Internal server error".to_string(),
            AppError::Unauthorized => "Authentication failed".to_string(),
            AppError::Forbidden => "Access denied".to_string(),
            AppError::NotFound => "Resource not found".to_string(),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::Database(_) => "Database error occurred".to_string(),
            AppError::Config(_) => "Configuration error".to_string(),
            AppError::Internal => "Internal server error".to_string(),
        }
    }

    /// Numeric error code
    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }
}

/// Error response DTO
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: u16,
    pub message: String,
    pub request_id: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: self.code(),
                message: self.user_message(),
                request_id,
            },
        };

        if status.is_server_error() {
            tracing::error!(
                code = self.code(),
                message = %self,
                request_id = %error_response.error.request_id,
                "Application error"
            );
        } else {
            tracing::debug!(
                code = self.code(),
                message = %self,
                request_id = %error_response.error.request_id,
                "Request rejected"
            );
        }

        (status, Json(error_response)).into_response()
    }
}

impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::Config(s)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Unauthorized.code(), 401);
        assert_eq!(AppError::Forbidden.code(), 403);
        assert_eq!(AppError::NotFound.code(), 404);
        assert_eq!(AppError::BadRequest("test".to_string()).code(), 400);
        assert_eq!(AppError::Internal.code(), 500);
    }

    #[test]
    fn test_token_error_codes() {
        assert_eq!(AppError::Token(TokenError::Expired).code(), 401);
        assert_eq!(AppError::Token(TokenError::Invalid).code(), 401);
        assert_eq!(AppError::Token(TokenError::KeyTooShort { min: 32 }).code(), 500);
    }

    #[test]
    fn test_expired_token_is_distinguishable() {
        // Clients must be able to tell "refresh your token" apart from
        // "your token is garbage"
        let expired = AppError::Token(TokenError::Expired);
        let invalid = AppError::Token(TokenError::Invalid);
        assert_ne!(expired.user_message(), invalid.user_message());
    }

    #[test]
    fn test_password_mismatch_is_unauthorized() {
        assert_eq!(AppError::Password(PasswordError::Mismatch).code(), 401);
        assert_eq!(
            AppError::Password(PasswordError::MalformedHash).code(),
            500
        );
    }

    #[test]
    fn test_user_message_no_sensitive_info() {
        let error = AppError::Database(sqlx::Error::RowNotFound);
        let message = error.user_message();
        assert_eq!(message, "Database error occurred");
        assert!(!message.contains("sqlx"));
    }
}
