// Event domain routes
use crate::domains::event::handlers::event_handler;
use crate::shared::services::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn create_event_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(event_handler::create_event).get(event_handler::list_events),
        )
        .route("/:id", get(event_handler::get_event))
}
