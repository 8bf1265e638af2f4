use crate::domains::wallet::models::WalletTransaction;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Per-user wallet: a non-negative balance plus its append-only transaction
/// log. The balance is mutated only through the wallet service operations,
/// never directly, so it always equals the sum of the log applied from zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    /// Assigned by the persistence layer at creation, immutable thereafter
    pub id: u64,
    /// Exactly one wallet per user (unique constraint)
    pub user_id: u64,
    pub balance: Decimal,
    /// Chronological, insertion order preserved
    pub transactions: Vec<WalletTransaction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// Sum of the transaction log applied in order from zero.
    /// Equals `balance` at all times; used by tests to check the invariant.
    pub fn ledger_sum(&self) -> Decimal {
        self.transactions
            .iter()
            .fold(Decimal::ZERO, |acc, tx| acc + tx.tx_type.signum() * tx.amount)
    }
}

/// Data for creating a wallet
#[derive(Debug, Clone)]
pub struct WalletCreate {
    pub user_id: u64,
    pub initial_balance: Decimal,
}

/// Filtered wallet lookup with offset/limit pagination
#[derive(Debug, Clone, Default)]
pub struct WalletQuery {
    pub user_id: Option<u64>,
    pub offset: i64,
    pub limit: Option<i64>,
}

/// Wallet response DTO: exactly the transport shape, nothing
/// persistence-specific leaks past it
#[derive(Debug, Serialize, ToSchema)]
#[schema(as = WalletResponse)]
pub struct WalletResponse {
    pub id: u64,
    pub user_id: u64,
    pub balance: Decimal,
    pub transactions: Vec<WalletTransaction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Wallet> for WalletResponse {
    fn from(wallet: Wallet) -> Self {
        Self {
            id: wallet.id,
            user_id: wallet.user_id,
            balance: wallet.balance,
            transactions: wallet.transactions,
            created_at: wallet.created_at,
            updated_at: wallet.updated_at,
        }
    }
}

/// Create wallet request
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = CreateWalletRequest)]
pub struct CreateWalletRequest {
    /// Optional starting balance; recorded as an opening CREDIT transaction
    #[schema(example = 0)]
    pub initial_balance: Option<Decimal>,
}

/// Deposit (add funds) request
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = DepositRequest)]
pub struct DepositRequest {
    #[schema(example = 500)]
    pub amount: Decimal,
    pub description: Option<String>,
}

/// Withdraw (deduct funds) request
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = WithdrawRequest)]
pub struct WithdrawRequest {
    #[schema(example = 200)]
    pub amount: Decimal,
    pub description: Option<String>,
}

/// Top-up order request (funds added after gateway payment)
#[derive(Debug, Deserialize, ToSchema)]
#[schema(as = TopUpOrderRequest)]
pub struct TopUpOrderRequest {
    #[schema(example = 1000)]
    pub amount: Decimal,
}
