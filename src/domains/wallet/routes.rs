// Wallet domain routes
use crate::domains::wallet::handlers::wallet_handler;
use crate::shared::services::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn create_wallet_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(wallet_handler::create_wallet).get(wallet_handler::list_wallets),
        )
        .route("/my", get(wallet_handler::get_my_wallet))
        .route("/deposit", post(wallet_handler::deposit))
        .route("/withdraw", post(wallet_handler::withdraw))
        .route("/topup-order", post(wallet_handler::create_topup_order))
}
