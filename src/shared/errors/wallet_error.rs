use axum::{http::StatusCode, Json};
use rust_decimal::Decimal;
use serde_json::json;
use thiserror::Error;

/// Wallet domain errors.
/// Rule violations (invalid amount, insufficient funds, duplicate wallet) are
/// typed so callers can tell user error from system error; persistence
/// failures are wrapped as `DatabaseError` with the cause in the message.
#[derive(Error, Debug)]
pub enum WalletError {
    #[error("Wallet not found for user: {user_id}")]
    NotFound { user_id: u64 },

    #[error("Wallet already exists for user: {user_id}")]
    AlreadyExists { user_id: u64 },

    #[error("Amount must be positive, got {amount}")]
    InvalidAmount { amount: Decimal },

    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Decimal, requested: Decimal },

    #[error("Payment gateway error: {0}")]
    UpstreamFailure(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<WalletError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: WalletError) -> Self {
        let status = match &err {
            WalletError::NotFound { .. } => StatusCode::NOT_FOUND,
            WalletError::AlreadyExists { .. } => StatusCode::CONFLICT,
            WalletError::InvalidAmount { .. } | WalletError::InsufficientFunds { .. } => {
                StatusCode::BAD_REQUEST
            }
            WalletError::UpstreamFailure(_) => StatusCode::BAD_GATEWAY,
            WalletError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": err.to_string() })))
    }
}
