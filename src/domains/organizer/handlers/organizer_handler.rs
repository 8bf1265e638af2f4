use crate::domains::organizer::models::{ApplicationResponse, ApplyRequest, ReviewRequest};
use crate::shared::errors::OrganizerError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::services::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

type ApiError = (StatusCode, Json<serde_json::Value>);

/// Apply to become an organizer
#[utoipa::path(
    post,
    path = "/api/organizers/apply",
    request_body = ApplyRequest,
    responses(
        (status = 201, description = "Application filed", body = ApplicationResponse),
        (status = 409, description = "A live application already exists"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Organizers",
    security(("BearerAuth" = []))
)]
pub async fn apply(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplicationResponse>), ApiError> {
    let application = app_state
        .organizer_state
        .organizer_service
        .apply(authenticated_user.user_id, request)
        .await
        .map_err(|e: OrganizerError| -> ApiError { e.into() })?;

    Ok((StatusCode::CREATED, Json(ApplicationResponse { application })))
}

/// The caller's latest application
#[utoipa::path(
    get,
    path = "/api/organizers/me",
    responses(
        (status = 200, description = "Application found", body = ApplicationResponse),
        (status = 404, description = "No application for this user"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Organizers",
    security(("BearerAuth" = []))
)]
pub async fn my_application(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let application = app_state
        .organizer_state
        .organizer_service
        .my_application(authenticated_user.user_id)
        .await
        .map_err(|e: OrganizerError| -> ApiError { e.into() })?;

    Ok(Json(ApplicationResponse { application }))
}

/// Admin review of a pending application
#[utoipa::path(
    put,
    path = "/api/organizers/{id}/review",
    params(
        ("id" = u64, Path, description = "Application id")
    ),
    request_body = ReviewRequest,
    responses(
        (status = 200, description = "Application reviewed", body = ApplicationResponse),
        (status = 400, description = "Invalid decision or already reviewed"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Application not found")
    ),
    tag = "Organizers",
    security(("BearerAuth" = []))
)]
pub async fn review(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(application_id): Path<u64>,
    Json(request): Json<ReviewRequest>,
) -> Result<Json<ApplicationResponse>, ApiError> {
    let application = app_state
        .organizer_state
        .organizer_service
        .review(authenticated_user.role, application_id, &request.decision)
        .await
        .map_err(|e: OrganizerError| -> ApiError { e.into() })?;

    Ok(Json(ApplicationResponse { application }))
}
