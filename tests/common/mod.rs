#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use ticket_api::domains::wallet::models::{
    TransactionCreate, TransactionType, Wallet, WalletCreate, WalletQuery, WalletTransaction,
};
use ticket_api::domains::wallet::services::WalletService;
use ticket_api::shared::clients::{PaymentGateway, PaymentOrder};
use ticket_api::shared::database::WalletRepository;

/// In-memory wallet store. One mutex over the whole store, so each
/// repository call is atomic, matching the single-statement guarantees of
/// the SQL implementation (notably `update`'s balance floor check).
#[derive(Default)]
pub struct InMemoryWalletRepository {
    state: Mutex<StoreState>,
}

#[derive(Default)]
struct StoreState {
    wallets: Vec<Wallet>,
    next_wallet_id: u64,
    next_tx_id: u64,
}

#[async_trait]
impl WalletRepository for InMemoryWalletRepository {
    async fn find_by_user_id(&self, user_id: u64) -> Result<Option<Wallet>> {
        let state = self.state.lock();
        Ok(state.wallets.iter().find(|w| w.user_id == user_id).cloned())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Wallet>> {
        let state = self.state.lock();
        Ok(state.wallets.iter().find(|w| w.id == id).cloned())
    }

    async fn find_all(&self, query: &WalletQuery) -> Result<Vec<Wallet>> {
        let state = self.state.lock();
        let limit = query.limit.unwrap_or(i64::MAX).max(0) as usize;
        Ok(state
            .wallets
            .iter()
            .filter(|w| query.user_id.map_or(true, |uid| w.user_id == uid))
            .skip(query.offset.max(0) as usize)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn count(&self, query: &WalletQuery) -> Result<u64> {
        let state = self.state.lock();
        Ok(state
            .wallets
            .iter()
            .filter(|w| query.user_id.map_or(true, |uid| w.user_id == uid))
            .count() as u64)
    }

    async fn save(&self, wallet: &WalletCreate) -> Result<Option<Wallet>> {
        let mut state = self.state.lock();
        if state.wallets.iter().any(|w| w.user_id == wallet.user_id) {
            return Ok(None);
        }
        state.next_wallet_id += 1;
        let id = state.next_wallet_id;
        let now = Utc::now();

        let mut transactions = Vec::new();
        if wallet.initial_balance > Decimal::ZERO {
            state.next_tx_id += 1;
            transactions.push(WalletTransaction {
                id: state.next_tx_id,
                wallet_id: id,
                tx_type: TransactionType::Credit,
                amount: wallet.initial_balance,
                description: Some("Opening balance".to_string()),
                date: now,
            });
        }

        let created = Wallet {
            id,
            user_id: wallet.user_id,
            balance: wallet.initial_balance,
            transactions,
            created_at: now,
            updated_at: now,
        };
        state.wallets.push(created.clone());
        Ok(Some(created))
    }

    async fn update(&self, wallet_id: u64, tx: &TransactionCreate) -> Result<Option<Wallet>> {
        let mut state = self.state.lock();
        state.next_tx_id += 1;
        let tx_id = state.next_tx_id;

        let Some(wallet) = state.wallets.iter_mut().find(|w| w.id == wallet_id) else {
            return Ok(None);
        };

        let delta = tx.tx_type.signum() * tx.amount;
        if wallet.balance + delta < Decimal::ZERO {
            return Ok(None);
        }

        let now = Utc::now();
        wallet.balance += delta;
        wallet.updated_at = now;
        wallet.transactions.push(WalletTransaction {
            id: tx_id,
            wallet_id,
            tx_type: tx.tx_type,
            amount: tx.amount,
            description: tx.description.clone(),
            date: now,
        });

        Ok(Some(wallet.clone()))
    }
}

/// Answers every user-id lookup with `None`, modeling a second API instance
/// whose existence check ran before the freshly inserted row became visible
/// to it. Saves still go through the store's uniqueness check.
#[derive(Default)]
pub struct UnsyncedLookupRepository {
    inner: InMemoryWalletRepository,
}

#[async_trait]
impl WalletRepository for UnsyncedLookupRepository {
    async fn find_by_user_id(&self, _user_id: u64) -> Result<Option<Wallet>> {
        Ok(None)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Wallet>> {
        self.inner.find_by_id(id).await
    }

    async fn find_all(&self, query: &WalletQuery) -> Result<Vec<Wallet>> {
        self.inner.find_all(query).await
    }

    async fn count(&self, query: &WalletQuery) -> Result<u64> {
        self.inner.count(query).await
    }

    async fn save(&self, wallet: &WalletCreate) -> Result<Option<Wallet>> {
        self.inner.save(wallet).await
    }

    async fn update(&self, wallet_id: u64, tx: &TransactionCreate) -> Result<Option<Wallet>> {
        self.inner.update(wallet_id, tx).await
    }
}

/// Payment gateway double: hands out sequential order ids and records every
/// requested amount; `failing()` simulates an unreachable upstream.
pub struct MockPaymentGateway {
    fail: bool,
    counter: AtomicU64,
    pub requested: Mutex<Vec<Decimal>>,
}

impl MockPaymentGateway {
    pub fn new() -> Self {
        Self {
            fail: false,
            counter: AtomicU64::new(0),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self { fail: true, ..Self::new() }
    }
}

#[async_trait]
impl PaymentGateway for MockPaymentGateway {
    async fn create_order(&self, amount: Decimal) -> Result<PaymentOrder> {
        if self.fail {
            anyhow::bail!("gateway unreachable");
        }
        self.requested.lock().push(amount);
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(PaymentOrder {
            order_id: format!("order_test_{:04}", n),
            status: "created".to_string(),
            amount,
            currency: "INR".to_string(),
        })
    }
}

pub fn wallet_service() -> WalletService {
    wallet_service_with_gateway(Arc::new(MockPaymentGateway::new()))
}

pub fn wallet_service_with_gateway(gateway: Arc<dyn PaymentGateway>) -> WalletService {
    WalletService::new(Arc::new(InMemoryWalletRepository::default()), gateway)
}

pub fn dec(n: i64) -> Decimal {
    Decimal::from(n)
}
