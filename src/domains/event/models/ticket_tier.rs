use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Ticket tier of an event (e.g. "General", "VIP").
/// `sold <= quantity` is enforced both here and by a DB check constraint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = TicketTier)]
pub struct TicketTier {
    pub id: u64,
    pub event_id: u64,
    pub name: String,
    /// Price per ticket in the platform's base currency unit
    pub price: Decimal,
    pub quantity: u64,
    pub sold: u64,
}

impl TicketTier {
    pub fn remaining(&self) -> u64 {
        self.quantity.saturating_sub(self.sold)
    }
}

/// Tier definition inside a create-event request
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = CreateTierRequest)]
pub struct CreateTierRequest {
    #[schema(example = "General")]
    pub name: String,
    #[schema(example = 250)]
    pub price: Decimal,
    #[schema(example = 100)]
    pub quantity: u64,
}
