use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User account
/// Note: PostgreSQL BIGSERIAL is signed, ids are converted to u64 in the repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub password_hash: String,
    pub username: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User role (stored as a lowercase string)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Organizer,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Organizer => "organizer",
            UserRole::Admin => "admin",
        }
    }

    /// Parse a stored role string. Unknown values fall back to the least
    /// privileged role.
    pub fn parse(s: &str) -> Self {
        match s {
            "organizer" => UserRole::Organizer,
            "admin" => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

/// Public user profile (never exposes the password hash)
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = UserResponse)]
pub struct UserResponse {
    pub id: u64,
    pub email: String,
    pub username: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
        }
    }
}
