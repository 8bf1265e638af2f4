use crate::domains::event::models::{
    CreateEventRequest, EventListResponse, EventResponse, ListEventsQuery,
};
use crate::shared::errors::EventError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::services::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

type ApiError = (StatusCode, Json<serde_json::Value>);

/// List an event (organizer role required); tiers are created with it
#[utoipa::path(
    post,
    path = "/api/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event listed", body = EventResponse),
        (status = 400, description = "Invalid event or tier"),
        (status = 403, description = "Organizer role required"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Events",
    security(("BearerAuth" = []))
)]
pub async fn create_event(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<CreateEventRequest>,
) -> Result<(StatusCode, Json<EventResponse>), ApiError> {
    let (event, tiers) = app_state
        .event_state
        .event_service
        .create_event(authenticated_user.user_id, authenticated_user.role, request)
        .await
        .map_err(|e: EventError| -> ApiError { e.into() })?;

    Ok((StatusCode::CREATED, Json(EventResponse { event, tiers })))
}

/// Public event listing with offset/limit pagination
#[utoipa::path(
    get,
    path = "/api/events",
    params(
        ("offset" = Option<i64>, Query, description = "Pagination offset"),
        ("limit" = Option<i64>, Query, description = "Page size (max 100)"),
        ("category" = Option<String>, Query, description = "Category filter")
    ),
    responses(
        (status = 200, description = "Events listed", body = EventListResponse)
    ),
    tag = "Events"
)]
pub async fn list_events(
    State(app_state): State<AppState>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<EventListResponse>, ApiError> {
    let (events, total, offset, limit) = app_state
        .event_state
        .event_service
        .list_events(&query)
        .await
        .map_err(|e: EventError| -> ApiError { e.into() })?;

    Ok(Json(EventListResponse {
        events,
        total,
        offset,
        limit,
    }))
}

/// Single event with its ticket tiers
#[utoipa::path(
    get,
    path = "/api/events/{id}",
    params(
        ("id" = u64, Path, description = "Event id")
    ),
    responses(
        (status = 200, description = "Event found", body = EventResponse),
        (status = 404, description = "Event not found")
    ),
    tag = "Events"
)]
pub async fn get_event(
    State(app_state): State<AppState>,
    Path(event_id): Path<u64>,
) -> Result<Json<EventResponse>, ApiError> {
    let (event, tiers) = app_state
        .event_state
        .event_service
        .get_event(event_id)
        .await
        .map_err(|e: EventError| -> ApiError { e.into() })?;

    Ok(Json(EventResponse { event, tiers }))
}
