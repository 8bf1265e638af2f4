use crate::domains::wallet::models::{
    TransactionCreate, TransactionType, Wallet, WalletCreate, WalletQuery,
};
use crate::shared::clients::{PaymentGateway, PaymentOrder};
use crate::shared::database::WalletRepository;
use crate::shared::errors::WalletError;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

/// Wallet service
///
/// Enforces the balance invariants and produces the auditable transaction
/// log:
/// - the balance always equals the sum of the log applied from zero,
/// - the balance never goes negative,
/// - every successful mutation writes the new balance and the appended
///   transaction together.
///
/// Balance mutations for one user are serialized through a per-user async
/// mutex, so the read-modify-write on the balance cannot race within this
/// process. The repository's guarded update and unique user_id are the
/// backstop across processes.
#[derive(Clone)]
pub struct WalletService {
    repo: Arc<dyn WalletRepository>,
    gateway: Arc<dyn PaymentGateway>,
    /// Per-user serialization points, created lazily and evicted once the
    /// last in-flight operation returns its handle
    locks: Arc<Mutex<HashMap<u64, Arc<tokio::sync::Mutex<()>>>>>,
}

impl WalletService {
    pub fn new(repo: Arc<dyn WalletRepository>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self {
            repo,
            gateway,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn lock_for(&self, user_id: u64) -> Arc<tokio::sync::Mutex<()>> {
        self.locks
            .lock()
            .entry(user_id)
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    // Return a handle taken via `lock_for`. The registry entry is dropped
    // when no other task holds it, so the map stays bounded by in-flight
    // operations rather than by users ever seen.
    fn release_lock(&self, user_id: u64, lock: Arc<tokio::sync::Mutex<()>>) {
        let mut locks = self.locks.lock();
        drop(lock);
        let idle = locks
            .get(&user_id)
            .map_or(false, |entry| Arc::strong_count(entry) == 1);
        if idle {
            locks.remove(&user_id);
        }
    }

    /// Fetch-or-fail lookup for a user's wallet.
    pub async fn get_wallet(&self, user_id: u64) -> Result<Wallet, WalletError> {
        self.repo
            .find_by_user_id(user_id)
            .await
            .map_err(|e| WalletError::DatabaseError(e.to_string()))?
            .ok_or(WalletError::NotFound { user_id })
    }

    /// Paginated wallet listing (admin surface).
    pub async fn list_wallets(&self, query: &WalletQuery) -> Result<(Vec<Wallet>, u64), WalletError> {
        let wallets = self
            .repo
            .find_all(query)
            .await
            .map_err(|e| WalletError::DatabaseError(e.to_string()))?;
        let total = self
            .repo
            .count(query)
            .await
            .map_err(|e| WalletError::DatabaseError(e.to_string()))?;
        Ok((wallets, total))
    }

    /// Create a wallet for a user who does not have one yet.
    /// A non-zero starting balance is recorded as an opening CREDIT
    /// transaction so the ledger invariant holds from the first read.
    pub async fn create_wallet(
        &self,
        user_id: u64,
        initial_balance: Option<Decimal>,
    ) -> Result<Wallet, WalletError> {
        let initial = initial_balance.unwrap_or(Decimal::ZERO);
        if initial < Decimal::ZERO {
            return Err(WalletError::InvalidAmount { amount: initial });
        }

        let lock = self.lock_for(user_id);
        let guard = lock.lock().await;
        let result = self.create_wallet_locked(user_id, initial).await;
        drop(guard);
        self.release_lock(user_id, lock);
        result
    }

    async fn create_wallet_locked(
        &self,
        user_id: u64,
        initial: Decimal,
    ) -> Result<Wallet, WalletError> {
        let existing = self
            .repo
            .find_by_user_id(user_id)
            .await
            .map_err(|e| WalletError::DatabaseError(e.to_string()))?;
        if existing.is_some() {
            return Err(WalletError::AlreadyExists { user_id });
        }

        let wallet = self
            .repo
            .save(&WalletCreate {
                user_id,
                initial_balance: initial,
            })
            .await
            .map_err(|e| WalletError::DatabaseError(e.to_string()))?
            // store-level uniqueness fired: another instance created it
            // between our check and the insert
            .ok_or(WalletError::AlreadyExists { user_id })?;

        tracing::info!(user_id, wallet_id = wallet.id, "Wallet created");
        Ok(wallet)
    }

    /// Credit the wallet. Requires `amount > 0`.
    pub async fn add_funds(
        &self,
        user_id: u64,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<Wallet, WalletError> {
        self.apply(user_id, TransactionType::Credit, amount, description)
            .await
    }

    /// Debit the wallet. Requires `amount > 0` and `amount <= balance`;
    /// a rejected debit leaves balance and log untouched.
    pub async fn deduct_funds(
        &self,
        user_id: u64,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<Wallet, WalletError> {
        self.apply(user_id, TransactionType::Debit, amount, description)
            .await
    }

    /// Return funds to the wallet as a REFUND transaction.
    pub async fn refund(
        &self,
        user_id: u64,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<Wallet, WalletError> {
        self.apply(user_id, TransactionType::Refund, amount, description)
            .await
    }

    /// Create a gateway payment order to top up this wallet.
    /// Pass-through to the collaborator; the wallet is only credited once
    /// payment is captured (outside this service).
    pub async fn create_topup_order(
        &self,
        user_id: u64,
        amount: Decimal,
    ) -> Result<PaymentOrder, WalletError> {
        if amount <= Decimal::ZERO {
            return Err(WalletError::InvalidAmount { amount });
        }
        // the wallet must exist before funding it
        self.get_wallet(user_id).await?;

        self.gateway
            .create_order(amount)
            .await
            .map_err(|e| WalletError::UpstreamFailure(e.to_string()))
    }

    // Shared mutation path: validate, serialize per user, apply through the
    // repository's single logical update.
    async fn apply(
        &self,
        user_id: u64,
        tx_type: TransactionType,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<Wallet, WalletError> {
        if amount <= Decimal::ZERO {
            return Err(WalletError::InvalidAmount { amount });
        }

        let lock = self.lock_for(user_id);
        let guard = lock.lock().await;
        let result = self.apply_locked(user_id, tx_type, amount, description).await;
        drop(guard);
        self.release_lock(user_id, lock);
        result
    }

    async fn apply_locked(
        &self,
        user_id: u64,
        tx_type: TransactionType,
        amount: Decimal,
        description: Option<String>,
    ) -> Result<Wallet, WalletError> {
        let wallet = self.get_wallet(user_id).await?;

        if tx_type == TransactionType::Debit && amount > wallet.balance {
            return Err(WalletError::InsufficientFunds {
                balance: wallet.balance,
                requested: amount,
            });
        }

        let updated = self
            .repo
            .update(
                wallet.id,
                &TransactionCreate {
                    tx_type,
                    amount,
                    description,
                },
            )
            .await
            .map_err(|e| WalletError::DatabaseError(e.to_string()))?;

        match updated {
            Some(wallet) => {
                tracing::info!(
                    user_id,
                    wallet_id = wallet.id,
                    tx_type = tx_type.as_str(),
                    %amount,
                    balance = %wallet.balance,
                    "Wallet mutated"
                );
                Ok(wallet)
            }
            // Store-level floor check fired: another writer got there first
            None => Err(WalletError::InsufficientFunds {
                balance: wallet.balance,
                requested: amount,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::wallet::models::WalletTransaction;
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::Utc;

    #[derive(Default)]
    struct VecStore(Mutex<Vec<Wallet>>);

    #[async_trait]
    impl WalletRepository for VecStore {
        async fn find_by_user_id(&self, user_id: u64) -> Result<Option<Wallet>> {
            Ok(self.0.lock().iter().find(|w| w.user_id == user_id).cloned())
        }

        async fn find_by_id(&self, id: u64) -> Result<Option<Wallet>> {
            Ok(self.0.lock().iter().find(|w| w.id == id).cloned())
        }

        async fn find_all(&self, _query: &WalletQuery) -> Result<Vec<Wallet>> {
            Ok(self.0.lock().clone())
        }

        async fn count(&self, _query: &WalletQuery) -> Result<u64> {
            Ok(self.0.lock().len() as u64)
        }

        async fn save(&self, wallet: &WalletCreate) -> Result<Option<Wallet>> {
            let mut wallets = self.0.lock();
            if wallets.iter().any(|w| w.user_id == wallet.user_id) {
                return Ok(None);
            }
            let now = Utc::now();
            let created = Wallet {
                id: wallets.len() as u64 + 1,
                user_id: wallet.user_id,
                balance: wallet.initial_balance,
                transactions: Vec::new(),
                created_at: now,
                updated_at: now,
            };
            wallets.push(created.clone());
            Ok(Some(created))
        }

        async fn update(&self, wallet_id: u64, tx: &TransactionCreate) -> Result<Option<Wallet>> {
            let mut wallets = self.0.lock();
            let Some(wallet) = wallets.iter_mut().find(|w| w.id == wallet_id) else {
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
                id: wallet.transactions.len() as u64 + 1,
                wallet_id,
                tx_type: tx.tx_type,
                amount: tx.amount,
                description: tx.description.clone(),
                date: now,
            });
            Ok(Some(wallet.clone()))
        }
    }

    struct NoGateway;

    #[async_trait]
    impl PaymentGateway for NoGateway {
        async fn create_order(&self, _amount: Decimal) -> Result<PaymentOrder> {
            anyhow::bail!("not used in these tests")
        }
    }

    fn service() -> WalletService {
        WalletService::new(Arc::new(VecStore::default()), Arc::new(NoGateway))
    }

    #[tokio::test]
    async fn lock_registry_is_bounded_by_in_flight_operations() {
        let service = service();
        for user_id in 1..=16 {
            service.create_wallet(user_id, None).await.unwrap();
            service.add_funds(user_id, Decimal::ONE, None).await.unwrap();
        }
        assert!(service.locks.lock().is_empty());
    }

    #[tokio::test]
    async fn rejected_operations_also_return_their_lock_entry() {
        let service = service();
        service.create_wallet(1, None).await.unwrap();

        assert!(service.deduct_funds(1, Decimal::ONE, None).await.is_err());
        assert!(service.create_wallet(1, None).await.is_err());

        assert!(service.locks.lock().is_empty());
    }

    #[tokio::test]
    async fn store_rejects_a_second_wallet_for_a_user() {
        let service = service();
        let repo = service.repo.clone();
        service.create_wallet(5, None).await.unwrap();

        // a second instance's insert hits the uniqueness check directly
        let saved = repo
            .save(&WalletCreate {
                user_id: 5,
                initial_balance: Decimal::ZERO,
            })
            .await
            .unwrap();
        assert!(saved.is_none());
    }
}
