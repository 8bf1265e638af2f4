use crate::domains::auth::models::UserRole;
use crate::shared::services::AppState;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use serde_json::json;

/// Authenticated user information (extracted from the JWT access token)
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: u64,
    pub email: String,
    pub role: UserRole,
}

/// Axum extractor: any handler taking an `AuthenticatedUser` parameter
/// requires a valid `Authorization: Bearer <token>` header.
#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = (StatusCode, axum::Json<serde_json::Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    axum::Json(json!({ "error": "Missing authorization header" })),
                )
            })?
            .to_str()
            .map_err(|_| {
                (
                    StatusCode::UNAUTHORIZED,
                    axum::Json(json!({ "error": "Invalid authorization header" })),
                )
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                axum::Json(json!({
                    "error": "Invalid authorization format. Expected: 'Bearer <token>'"
                })),
            )
        })?;

        let claims = state
            .auth_state
            .jwt_service
            .verify_access_token(token)
            .map_err(|e| {
                (
                    StatusCode::UNAUTHORIZED,
                    axum::Json(json!({ "error": e.to_string() })),
                )
            })?;

        Ok(AuthenticatedUser {
            user_id: claims.user_id,
            email: claims.email,
            role: claims.role,
        })
    }
}
