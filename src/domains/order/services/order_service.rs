use crate::domains::order::models::{
    CreateOrderRequest, OrderStatus, PaymentMethod, TicketOrder, TicketOrderCreate,
};
use crate::domains::wallet::services::WalletService;
use crate::shared::clients::{PaymentGateway, PaymentOrder};
use crate::shared::database::{Database, EventRepository, OrderRepository};
use crate::shared::errors::OrderError;
use rust_decimal::Decimal;
use std::sync::Arc;

/// Ticket purchase flow.
///
/// Wallet-paid orders settle immediately against the wallet service (and
/// inherit its invariants); gateway-paid orders create a payment order with
/// the external collaborator and stay pending until payment is captured.
#[derive(Clone)]
pub struct OrderService {
    db: Database,
    wallet_service: WalletService,
    gateway: Arc<dyn PaymentGateway>,
}

impl OrderService {
    pub fn new(db: Database, wallet_service: WalletService, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            db,
            wallet_service,
            gateway,
        }
    }

    pub async fn create_order(
        &self,
        user_id: u64,
        request: CreateOrderRequest,
    ) -> Result<(TicketOrder, Option<PaymentOrder>), OrderError> {
        if request.quantity == 0 {
            return Err(OrderError::InvalidQuantity {
                quantity: request.quantity,
            });
        }

        let event_repo = EventRepository::new(self.db.pool().clone());

        let event = event_repo
            .find_by_id(request.event_id)
            .await
            .map_err(|e| OrderError::DatabaseError(e.to_string()))?
            .ok_or(OrderError::EventNotFound { id: request.event_id })?;

        let tier = event_repo
            .find_tier(request.tier_id)
            .await
            .map_err(|e| OrderError::DatabaseError(e.to_string()))?
            .ok_or(OrderError::TierNotFound { id: request.tier_id })?;

        if tier.event_id != event.id {
            return Err(OrderError::TierMismatch {
                tier_id: tier.id,
                event_id: event.id,
            });
        }

        let total = tier.price * Decimal::from(request.quantity);

        match request.payment_method {
            PaymentMethod::Wallet => {
                self.create_wallet_order(user_id, &event_repo, &request, &event.title, total)
                    .await
                    .map(|order| (order, None))
            }
            PaymentMethod::Gateway => {
                if tier.remaining() < request.quantity {
                    return Err(OrderError::SoldOut {
                        remaining: tier.remaining(),
                    });
                }
                self.create_gateway_order(user_id, &request, total).await
            }
        }
    }

    // Reserve first (atomic capacity check), then charge the wallet; a
    // failed charge releases the reservation.
    async fn create_wallet_order(
        &self,
        user_id: u64,
        event_repo: &EventRepository,
        request: &CreateOrderRequest,
        event_title: &str,
        total: Decimal,
    ) -> Result<TicketOrder, OrderError> {
        let tier = event_repo
            .reserve_tickets(request.tier_id, request.quantity)
            .await
            .map_err(|e| OrderError::DatabaseError(e.to_string()))?;
        let Some(tier) = tier else {
            let current = event_repo
                .find_tier(request.tier_id)
                .await
                .map_err(|e| OrderError::DatabaseError(e.to_string()))?;
            return Err(OrderError::SoldOut {
                remaining: current.map(|t| t.remaining()).unwrap_or(0),
            });
        };

        let description = format!(
            "{} x{} ticket(s) for {}",
            tier.name, request.quantity, event_title
        );
        if let Err(e) = self
            .wallet_service
            .deduct_funds(user_id, total, Some(description))
            .await
        {
            event_repo
                .release_tickets(request.tier_id, request.quantity)
                .await
                .map_err(|e| OrderError::DatabaseError(e.to_string()))?;
            return Err(OrderError::Wallet(e));
        }

        let order_repo = OrderRepository::new(self.db.pool().clone());
        let order = match order_repo
            .create(&TicketOrderCreate {
                user_id,
                event_id: request.event_id,
                tier_id: request.tier_id,
                quantity: request.quantity,
                total_amount: total,
                payment_order_id: None,
                status: OrderStatus::Paid,
            })
            .await
        {
            Ok(order) => order,
            // Order row was not recorded: reverse the charge and the reservation
            Err(e) => {
                if let Err(refund_err) = self
                    .wallet_service
                    .refund(
                        user_id,
                        total,
                        Some(format!("Reversal: order for {} was not recorded", event_title)),
                    )
                    .await
                {
                    tracing::error!(user_id, %total, error = %refund_err, "Failed to reverse wallet charge");
                }
                if let Err(release_err) = event_repo
                    .release_tickets(request.tier_id, request.quantity)
                    .await
                {
                    tracing::error!(
                        tier_id = request.tier_id,
                        error = %release_err,
                        "Failed to release reserved tickets"
                    );
                }
                return Err(OrderError::DatabaseError(e.to_string()));
            }
        };

        tracing::info!(order_id = order.id, user_id, %total, "Order paid from wallet");
        Ok(order)
    }

    // Gateway-paid orders stay pending; tickets are not reserved until the
    // payment is captured (webhook capture is out of scope here).
    async fn create_gateway_order(
        &self,
        user_id: u64,
        request: &CreateOrderRequest,
        total: Decimal,
    ) -> Result<(TicketOrder, Option<PaymentOrder>), OrderError> {
        let payment_order = self
            .gateway
            .create_order(total)
            .await
            .map_err(|e| OrderError::GatewayError(e.to_string()))?;

        let order_repo = OrderRepository::new(self.db.pool().clone());
        let order = order_repo
            .create(&TicketOrderCreate {
                user_id,
                event_id: request.event_id,
                tier_id: request.tier_id,
                quantity: request.quantity,
                total_amount: total,
                payment_order_id: Some(payment_order.order_id.clone()),
                status: OrderStatus::Pending,
            })
            .await
            .map_err(|e| OrderError::DatabaseError(e.to_string()))?;

        tracing::info!(
            order_id = order.id,
            user_id,
            payment_order_id = %payment_order.order_id,
            "Gateway payment order created"
        );
        Ok((order, Some(payment_order)))
    }

    pub async fn my_orders(&self, user_id: u64) -> Result<Vec<TicketOrder>, OrderError> {
        let order_repo = OrderRepository::new(self.db.pool().clone());

        order_repo
            .find_all_by_user(user_id)
            .await
            .map_err(|e| OrderError::DatabaseError(e.to_string()))
    }

    /// Owner-only lookup.
    pub async fn get_order(&self, user_id: u64, order_id: u64) -> Result<TicketOrder, OrderError> {
        let order_repo = OrderRepository::new(self.db.pool().clone());

        let order = order_repo
            .find_by_id(order_id)
            .await
            .map_err(|e| OrderError::DatabaseError(e.to_string()))?
            .ok_or(OrderError::NotFound { id: order_id })?;

        if order.user_id != user_id {
            return Err(OrderError::Forbidden);
        }

        Ok(order)
    }
}
