// Organizer domain routes
use crate::domains::organizer::handlers::organizer_handler;
use crate::shared::services::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};

pub fn create_organizer_router() -> Router<AppState> {
    Router::new()
        .route("/apply", post(organizer_handler::apply))
        .route("/me", get(organizer_handler::my_application))
        .route("/:id/review", put(organizer_handler::review))
}
