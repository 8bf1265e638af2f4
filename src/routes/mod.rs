// Routes module: combines all domain routers
use crate::shared::services::AppState;
use axum::Router;

use crate::domains::auth::routes::create_auth_router;
use crate::domains::event::routes::create_event_router;
use crate::domains::order::routes::create_order_router;
use crate::domains::organizer::routes::create_organizer_router;
use crate::domains::wallet::routes::create_wallet_router;

/// Create main router (combines all domain routers)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", create_auth_router())
        .nest("/api/organizers", create_organizer_router())
        .nest("/api/events", create_event_router())
        .nest("/api/wallet", create_wallet_router())
        .nest("/api/orders", create_order_router())
}
