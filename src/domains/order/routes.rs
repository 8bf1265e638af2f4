// Order domain routes
use crate::domains::order::handlers::order_handler;
use crate::shared::services::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn create_order_router() -> Router<AppState> {
    Router::new()
        .route("/", post(order_handler::create_order))
        .route("/my", get(order_handler::my_orders))
        .route("/:id", get(order_handler::get_order))
}
