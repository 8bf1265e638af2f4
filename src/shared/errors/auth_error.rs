use axum::{http::StatusCode, Json};
use serde_json::json;
use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Email already exists: {email}")]
    EmailAlreadyExists { email: String },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found: id={id}")]
    UserNotFound { id: u64 },

    #[error("Failed to hash password: {0}")]
    PasswordHashingFailed(String),

    #[error("Failed to verify password: {0}")]
    PasswordVerificationFailed(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token not provided")]
    MissingToken,
}

/// Map AuthError to an HTTP response.
/// Internal causes stay in the message for logging; the body only carries the
/// stable error string.
impl From<AuthError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: AuthError) -> Self {
        let status = match &err {
            AuthError::EmailAlreadyExists { .. } => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials
            | AuthError::InvalidToken
            | AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound { .. } => StatusCode::NOT_FOUND,
            AuthError::PasswordHashingFailed(_)
            | AuthError::PasswordVerificationFailed(_)
            | AuthError::DatabaseError(_)
            | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
