use crate::domains::auth::models::{
    LogoutRequest, LogoutResponse, RefreshTokenRequest, RefreshTokenResponse, SigninRequest,
    SigninResponse, SignupRequest, SignupResponse, UserResponse,
};
use crate::shared::errors::AuthError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::services::AppState;
use axum::{extract::State, http::StatusCode, Json};

type ApiError = (StatusCode, Json<serde_json::Value>);

/// Signup handler
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created", body = SignupResponse),
        (status = 400, description = "Email already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn signup(
    State(app_state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let user = app_state
        .auth_state
        .auth_service
        .signup(request)
        .await
        .map_err(|e: AuthError| -> ApiError { e.into() })?;

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user: user.into(),
            message: "Signup successful".to_string(),
        }),
    ))
}

/// Signin handler: returns access + refresh tokens
#[utoipa::path(
    post,
    path = "/api/auth/signin",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Signed in", body = SigninResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn signin(
    State(app_state): State<AppState>,
    Json(request): Json<SigninRequest>,
) -> Result<Json<SigninResponse>, ApiError> {
    let (user, refresh_token) = app_state
        .auth_state
        .auth_service
        .signin(request)
        .await
        .map_err(|e: AuthError| -> ApiError { e.into() })?;

    let access_token = app_state
        .auth_state
        .jwt_service
        .generate_access_token(&user)
        .map_err(|e: AuthError| -> ApiError { e.into() })?;

    Ok(Json(SigninResponse {
        access_token,
        refresh_token,
        user: user.into(),
    }))
}

/// Refresh handler: rotates the refresh token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Tokens rotated", body = RefreshTokenResponse),
        (status = 401, description = "Invalid or expired refresh token")
    ),
    tag = "Auth"
)]
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> Result<Json<RefreshTokenResponse>, ApiError> {
    let (access_token, refresh_token) = app_state
        .auth_state
        .auth_service
        .refresh_access_token(&request.refresh_token)
        .await
        .map_err(|e: AuthError| -> ApiError { e.into() })?;

    Ok(Json(RefreshTokenResponse {
        access_token,
        refresh_token,
    }))
}

/// Logout handler: revokes the refresh token
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    request_body = LogoutRequest,
    responses(
        (status = 200, description = "Logged out", body = LogoutResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn logout(
    State(app_state): State<AppState>,
    Json(request): Json<LogoutRequest>,
) -> Result<Json<LogoutResponse>, ApiError> {
    app_state
        .auth_state
        .auth_service
        .logout(&request.refresh_token)
        .await
        .map_err(|e: AuthError| -> ApiError { e.into() })?;

    Ok(Json(LogoutResponse {
        message: "Logged out".to_string(),
    }))
}

/// Current user profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "User not found")
    ),
    tag = "Auth",
    security(("BearerAuth" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = app_state
        .auth_state
        .auth_service
        .get_user(authenticated_user.user_id)
        .await
        .map_err(|e: AuthError| -> ApiError { e.into() })?;

    Ok(Json(user.into()))
}
