use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Transaction type: a closed set, no other values exist.
/// The sign of a transaction is implied by its type; `amount` is always
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    /// Adds to the balance (deposit)
    Credit,
    /// Subtracts from the balance (purchase, withdrawal)
    Debit,
    /// Adds to the balance (returned funds)
    Refund,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Credit => "CREDIT",
            TransactionType::Debit => "DEBIT",
            TransactionType::Refund => "REFUND",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "CREDIT" => Some(TransactionType::Credit),
            "DEBIT" => Some(TransactionType::Debit),
            "REFUND" => Some(TransactionType::Refund),
            _ => None,
        }
    }

    /// Signed effect of one unit of this transaction type on the balance.
    pub fn signum(&self) -> Decimal {
        match self {
            TransactionType::Credit | TransactionType::Refund => Decimal::ONE,
            TransactionType::Debit => Decimal::NEGATIVE_ONE,
        }
    }
}

/// A single balance-affecting event. Immutable once appended: the model has
/// no update or delete operation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[schema(as = WalletTransaction)]
pub struct WalletTransaction {
    pub id: u64,
    pub wallet_id: u64,
    pub tx_type: TransactionType,
    /// Always positive; sign is carried by `tx_type`
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: DateTime<Utc>,
}

/// Data for appending a transaction (id and date are assigned on write)
#[derive(Debug, Clone)]
pub struct TransactionCreate {
    pub tx_type: TransactionType,
    pub amount: Decimal,
    pub description: Option<String>,
}
