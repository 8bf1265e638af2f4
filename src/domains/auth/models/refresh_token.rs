use chrono::{DateTime, Utc};

/// Stored refresh token (only the sha256 hash is persisted)
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub id: u64,
    pub user_id: u64,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

/// Data for creating a refresh token row
#[derive(Debug)]
pub struct RefreshTokenCreate {
    pub user_id: u64,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}
