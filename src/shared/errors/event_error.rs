use axum::{http::StatusCode, Json};
use serde_json::json;
use thiserror::Error;

/// Event domain errors
#[derive(Error, Debug)]
pub enum EventError {
    #[error("Event not found: id={id}")]
    NotFound { id: u64 },

    #[error("Only approved organizers can list events")]
    NotAnOrganizer,

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Invalid ticket tier: {0}")]
    InvalidTier(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<EventError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: EventError) -> Self {
        let status = match &err {
            EventError::NotFound { .. } => StatusCode::NOT_FOUND,
            EventError::NotAnOrganizer => StatusCode::FORBIDDEN,
            EventError::InvalidEvent(_) | EventError::InvalidTier(_) => StatusCode::BAD_REQUEST,
            EventError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
