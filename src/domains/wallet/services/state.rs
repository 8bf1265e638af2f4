// Wallet domain state
use crate::domains::wallet::services::WalletService;
use crate::shared::clients::PaymentGateway;
use crate::shared::database::{Database, PgWalletRepository};
use std::sync::Arc;

#[derive(Clone)]
pub struct WalletState {
    pub wallet_service: WalletService,
}

impl WalletState {
    /// Wire the service to the Postgres repository. Tests construct
    /// `WalletService` directly with an in-memory repository instead.
    pub fn new(db: Database, gateway: Arc<dyn PaymentGateway>) -> Self {
        let repo = Arc::new(PgWalletRepository::new(db.pool().clone()));
        Self {
            wallet_service: WalletService::new(repo, gateway),
        }
    }
}
