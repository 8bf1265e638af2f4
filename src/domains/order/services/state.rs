// Order domain state
use crate::domains::order::services::OrderService;
use crate::domains::wallet::services::WalletService;
use crate::shared::clients::PaymentGateway;
use crate::shared::database::Database;
use std::sync::Arc;

#[derive(Clone)]
pub struct OrderState {
    pub order_service: OrderService,
}

impl OrderState {
    pub fn new(db: Database, wallet_service: WalletService, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            order_service: OrderService::new(db, wallet_service, gateway),
        }
    }
}
