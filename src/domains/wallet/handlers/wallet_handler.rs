use crate::domains::auth::models::UserRole;
use crate::domains::wallet::models::{
    CreateWalletRequest, DepositRequest, TopUpOrderRequest, WalletQuery, WalletResponse,
    WithdrawRequest,
};
use crate::shared::clients::PaymentOrder;
use crate::shared::errors::WalletError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::services::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;

type ApiError = (StatusCode, Json<serde_json::Value>);

/// Create wallet handler.
/// The owning user comes from the JWT; one wallet per user.
#[utoipa::path(
    post,
    path = "/api/wallet",
    request_body = CreateWalletRequest,
    responses(
        (status = 201, description = "Wallet created", body = WalletResponse),
        (status = 409, description = "Wallet already exists"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Wallet",
    security(("BearerAuth" = []))
)]
pub async fn create_wallet(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<CreateWalletRequest>,
) -> Result<(StatusCode, Json<WalletResponse>), ApiError> {
    let wallet = app_state
        .wallet_state
        .wallet_service
        .create_wallet(authenticated_user.user_id, request.initial_balance)
        .await
        .map_err(|e: WalletError| -> ApiError { e.into() })?;

    Ok((StatusCode::CREATED, Json(wallet.into())))
}

/// Get the caller's wallet (balance + full transaction log)
#[utoipa::path(
    get,
    path = "/api/wallet/my",
    responses(
        (status = 200, description = "Wallet retrieved", body = WalletResponse),
        (status = 404, description = "No wallet for this user"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Wallet",
    security(("BearerAuth" = []))
)]
pub async fn get_my_wallet(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<WalletResponse>, ApiError> {
    let wallet = app_state
        .wallet_state
        .wallet_service
        .get_wallet(authenticated_user.user_id)
        .await
        .map_err(|e: WalletError| -> ApiError { e.into() })?;

    Ok(Json(wallet.into()))
}

/// Add funds to the caller's wallet
#[utoipa::path(
    post,
    path = "/api/wallet/deposit",
    request_body = DepositRequest,
    responses(
        (status = 200, description = "Funds added", body = WalletResponse),
        (status = 400, description = "Invalid amount"),
        (status = 404, description = "No wallet for this user"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Wallet",
    security(("BearerAuth" = []))
)]
pub async fn deposit(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<DepositRequest>,
) -> Result<Json<WalletResponse>, ApiError> {
    let wallet = app_state
        .wallet_state
        .wallet_service
        .add_funds(authenticated_user.user_id, request.amount, request.description)
        .await
        .map_err(|e: WalletError| -> ApiError { e.into() })?;

    Ok(Json(wallet.into()))
}

/// Deduct funds from the caller's wallet
#[utoipa::path(
    post,
    path = "/api/wallet/withdraw",
    request_body = WithdrawRequest,
    responses(
        (status = 200, description = "Funds deducted", body = WalletResponse),
        (status = 400, description = "Invalid amount or insufficient funds"),
        (status = 404, description = "No wallet for this user"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Wallet",
    security(("BearerAuth" = []))
)]
pub async fn withdraw(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<WithdrawRequest>,
) -> Result<Json<WalletResponse>, ApiError> {
    let wallet = app_state
        .wallet_state
        .wallet_service
        .deduct_funds(authenticated_user.user_id, request.amount, request.description)
        .await
        .map_err(|e: WalletError| -> ApiError { e.into() })?;

    Ok(Json(wallet.into()))
}

/// Create a gateway payment order to top up the caller's wallet
#[utoipa::path(
    post,
    path = "/api/wallet/topup-order",
    request_body = TopUpOrderRequest,
    responses(
        (status = 200, description = "Payment order created", body = PaymentOrder),
        (status = 400, description = "Invalid amount"),
        (status = 404, description = "No wallet for this user"),
        (status = 502, description = "Payment gateway unavailable")
    ),
    tag = "Wallet",
    security(("BearerAuth" = []))
)]
pub async fn create_topup_order(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<TopUpOrderRequest>,
) -> Result<Json<PaymentOrder>, ApiError> {
    let order = app_state
        .wallet_state
        .wallet_service
        .create_topup_order(authenticated_user.user_id, request.amount)
        .await
        .map_err(|e: WalletError| -> ApiError { e.into() })?;

    Ok(Json(order))
}

/// Admin listing query parameters
#[derive(Debug, Deserialize)]
pub struct ListWalletsQuery {
    pub user_id: Option<u64>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

/// Admin-only paginated wallet listing
#[utoipa::path(
    get,
    path = "/api/wallet",
    params(
        ("user_id" = Option<u64>, Query, description = "Filter by owning user"),
        ("offset" = Option<i64>, Query, description = "Pagination offset"),
        ("limit" = Option<i64>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Wallets listed"),
        (status = 403, description = "Admin role required"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Wallet",
    security(("BearerAuth" = []))
)]
pub async fn list_wallets(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Query(query): Query<ListWalletsQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if authenticated_user.role != UserRole::Admin {
        return Err((
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Admin role required" })),
        ));
    }

    let (wallets, total) = app_state
        .wallet_state
        .wallet_service
        .list_wallets(&WalletQuery {
            user_id: query.user_id,
            offset: query.offset.unwrap_or(0).max(0),
            limit: Some(query.limit.unwrap_or(20).clamp(1, 100)),
        })
        .await
        .map_err(|e: WalletError| -> ApiError { e.into() })?;

    let wallets: Vec<WalletResponse> = wallets.into_iter().map(Into::into).collect();
    Ok(Json(json!({ "wallets": wallets, "total": total })))
}
