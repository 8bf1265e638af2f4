use crate::domains::auth::models::UserRole;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: u64,
    pub email: String,
    pub role: UserRole,
    /// Expiry (unix seconds)
    pub exp: i64,
    /// Issued at (unix seconds)
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: u64, email: String, role: UserRole, valid_hours: i64) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            email,
            role,
            exp: (now + Duration::hours(valid_hours)).timestamp(),
            iat: now.timestamp(),
        }
    }
}
