use crate::domains::order::models::{CreateOrderRequest, OrderResponse, OrdersResponse};
use crate::shared::errors::OrderError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::services::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

type ApiError = (StatusCode, Json<serde_json::Value>);

/// Create a ticket order, paid from the wallet or via the payment gateway
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Invalid quantity, sold out, or insufficient funds"),
        (status = 404, description = "Event or tier not found"),
        (status = 502, description = "Payment gateway unavailable"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Orders",
    security(("BearerAuth" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), ApiError> {
    let (order, payment_order) = app_state
        .order_state
        .order_service
        .create_order(authenticated_user.user_id, request)
        .await
        .map_err(|e: OrderError| -> ApiError { e.into() })?;

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse {
            order,
            payment_order,
        }),
    ))
}

/// The caller's orders, newest first
#[utoipa::path(
    get,
    path = "/api/orders/my",
    responses(
        (status = 200, description = "Orders listed", body = OrdersResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Orders",
    security(("BearerAuth" = []))
)]
pub async fn my_orders(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<OrdersResponse>, ApiError> {
    let orders = app_state
        .order_state
        .order_service
        .my_orders(authenticated_user.user_id)
        .await
        .map_err(|e: OrderError| -> ApiError { e.into() })?;

    Ok(Json(OrdersResponse { orders }))
}

/// Owner-only order lookup
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = u64, Path, description = "Order id")
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 403, description = "Order belongs to another user"),
        (status = 404, description = "Order not found"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Orders",
    security(("BearerAuth" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(order_id): Path<u64>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = app_state
        .order_state
        .order_service
        .get_order(authenticated_user.user_id, order_id)
        .await
        .map_err(|e: OrderError| -> ApiError { e.into() })?;

    Ok(Json(OrderResponse {
        order,
        payment_order: None,
    }))
}
