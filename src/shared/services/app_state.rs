use crate::domains::auth::services::{AuthState, JwtService};
use crate::domains::event::services::EventState;
use crate::domains::order::services::OrderState;
use crate::domains::organizer::services::OrganizerState;
use crate::domains::wallet::services::WalletState;
use crate::shared::clients::{PaymentGateway, RazorpayClient};
use crate::shared::config::Config;
use crate::shared::database::Database;
use anyhow::Result;
use std::sync::Arc;

/// Application state: combines all domain states.
/// Built once at startup from the config and shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth_state: AuthState,
    pub organizer_state: OrganizerState,
    pub event_state: EventState,
    pub wallet_state: WalletState,
    pub order_state: OrderState,
}

impl AppState {
    pub fn new(db: Database, config: &Config) -> Result<Self> {
        let jwt_service = JwtService::new(config.jwt_secret.clone());
        let gateway: Arc<dyn PaymentGateway> = Arc::new(RazorpayClient::new(config)?);

        let auth_state = AuthState::new(db.clone(), jwt_service);
        let organizer_state = OrganizerState::new(db.clone());
        let event_state = EventState::new(db.clone());
        let wallet_state = WalletState::new(db.clone(), gateway.clone());
        let order_state = OrderState::new(
            db.clone(),
            wallet_state.wallet_service.clone(),
            gateway,
        );

        Ok(Self {
            db,
            auth_state,
            organizer_state,
            event_state,
            wallet_state,
            order_state,
        })
    }
}
