// Auth domain routes
use crate::domains::auth::handlers::auth_handler;
use crate::shared::services::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth_handler::signup))
        .route("/signin", post(auth_handler::signin))
        .route("/refresh", post(auth_handler::refresh))
        .route("/logout", post(auth_handler::logout))
        .route("/me", get(auth_handler::get_me))
}
