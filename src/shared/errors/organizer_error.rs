use axum::{http::StatusCode, Json};
use serde_json::json;
use thiserror::Error;

/// Organizer application errors
#[derive(Error, Debug)]
pub enum OrganizerError {
    #[error("An application already exists for user: {user_id}")]
    AlreadyApplied { user_id: u64 },

    #[error("Application not found: id={id}")]
    NotFound { id: u64 },

    #[error("No application found for user: {user_id}")]
    NotFoundForUser { user_id: u64 },

    #[error("Only admins can review applications")]
    Forbidden,

    #[error("Invalid decision: {0} (expected 'approved' or 'rejected')")]
    InvalidDecision(String),

    #[error("Application has already been reviewed")]
    AlreadyReviewed,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<OrganizerError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: OrganizerError) -> Self {
        let status = match &err {
            OrganizerError::AlreadyApplied { .. } => StatusCode::CONFLICT,
            OrganizerError::NotFound { .. } | OrganizerError::NotFoundForUser { .. } => {
                StatusCode::NOT_FOUND
            }
            OrganizerError::Forbidden => StatusCode::FORBIDDEN,
            OrganizerError::InvalidDecision(_) | OrganizerError::AlreadyReviewed => {
                StatusCode::BAD_REQUEST
            }
            OrganizerError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
