use crate::shared::errors::WalletError;
use axum::{http::StatusCode, Json};
use serde_json::json;
use thiserror::Error;

/// Order domain errors
#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Event not found: id={id}")]
    EventNotFound { id: u64 },

    #[error("Ticket tier not found: id={id}")]
    TierNotFound { id: u64 },

    #[error("Ticket tier {tier_id} does not belong to event {event_id}")]
    TierMismatch { tier_id: u64, event_id: u64 },

    #[error("Quantity must be positive, got {quantity}")]
    InvalidQuantity { quantity: u64 },

    #[error("Not enough tickets left: {remaining} remaining")]
    SoldOut { remaining: u64 },

    #[error("Order not found: id={id}")]
    NotFound { id: u64 },

    #[error("Order belongs to another user")]
    Forbidden,

    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error("Payment gateway error: {0}")]
    GatewayError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<OrderError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: OrderError) -> Self {
        // Wallet failures keep their own status mapping
        let err = match err {
            OrderError::Wallet(inner) => return inner.into(),
            other => other,
        };

        let status = match &err {
            OrderError::EventNotFound { .. }
            | OrderError::TierNotFound { .. }
            | OrderError::NotFound { .. } => StatusCode::NOT_FOUND,
            OrderError::TierMismatch { .. }
            | OrderError::InvalidQuantity { .. }
            | OrderError::SoldOut { .. } => StatusCode::BAD_REQUEST,
            OrderError::Forbidden => StatusCode::FORBIDDEN,
            OrderError::GatewayError(_) => StatusCode::BAD_GATEWAY,
            OrderError::DatabaseError(_) | OrderError::Wallet(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
