use crate::shared::clients::PaymentOrder;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Order state (stored as a lowercase string)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Awaiting gateway payment
    Pending,
    Paid,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "paid" => Some(OrderStatus::Paid),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }
}

/// How the buyer pays for an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Deduct from the platform wallet (settles immediately)
    Wallet,
    /// Create a payment order with the external gateway
    Gateway,
}

/// A ticket purchase
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = TicketOrder)]
pub struct TicketOrder {
    pub id: u64,
    pub user_id: u64,
    pub event_id: u64,
    pub tier_id: u64,
    pub quantity: u64,
    /// price x quantity, in the platform's base currency unit
    pub total_amount: Decimal,
    /// Gateway order id, present for gateway-paid orders
    pub payment_order_id: Option<String>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for inserting an order row
#[derive(Debug)]
pub struct TicketOrderCreate {
    pub user_id: u64,
    pub event_id: u64,
    pub tier_id: u64,
    pub quantity: u64,
    pub total_amount: Decimal,
    pub payment_order_id: Option<String>,
    pub status: OrderStatus,
}

/// Create order request
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = CreateOrderRequest)]
pub struct CreateOrderRequest {
    #[schema(example = 1)]
    pub event_id: u64,
    #[schema(example = 1)]
    pub tier_id: u64,
    #[schema(example = 2)]
    pub quantity: u64,
    pub payment_method: PaymentMethod,
}

/// Create order response. `payment_order` is set for gateway-paid orders and
/// carries what the frontend needs to start the checkout flow.
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = OrderResponse)]
pub struct OrderResponse {
    pub order: TicketOrder,
    pub payment_order: Option<PaymentOrder>,
}

/// Order list response
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = OrdersResponse)]
pub struct OrdersResponse {
    pub orders: Vec<TicketOrder>,
}
