use crate::domains::auth::models::UserResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Signup request
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = SignupRequest)]
pub struct SignupRequest {
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "hunter2!")]
    pub password: String,
    #[schema(example = "alice")]
    pub username: Option<String>,
}

/// Signup response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = SignupResponse)]
pub struct SignupResponse {
    pub user: UserResponse,
    pub message: String,
}

/// Signin request
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = SigninRequest)]
pub struct SigninRequest {
    #[schema(example = "alice@example.com")]
    pub email: String,
    pub password: String,
}

/// Signin response (access token + refresh token)
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = SigninResponse)]
pub struct SigninResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: UserResponse,
}

/// Refresh request
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = RefreshTokenRequest)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Refresh response (rotated tokens)
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = RefreshTokenResponse)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// Logout request
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = LogoutRequest)]
pub struct LogoutRequest {
    pub refresh_token: String,
}

/// Logout response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = LogoutResponse)]
pub struct LogoutResponse {
    pub message: String,
}
