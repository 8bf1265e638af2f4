use crate::domains::wallet::models::{
    TransactionCreate, TransactionType, Wallet, WalletCreate, WalletQuery, WalletTransaction,
};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{postgres::PgRow, PgPool, Row};

/// Persistence contract consumed by the wallet service.
///
/// The service depends only on this trait, never on sqlx types, so the
/// storage backend can be substituted (the test suite runs against an
/// in-memory implementation). Lookups return `None` when nothing matches;
/// translating absence into a domain failure is the service's job.
#[async_trait]
pub trait WalletRepository: Send + Sync {
    async fn find_by_user_id(&self, user_id: u64) -> Result<Option<Wallet>>;

    async fn find_by_id(&self, id: u64) -> Result<Option<Wallet>>;

    /// Filtered lookup with offset/limit pagination
    async fn find_all(&self, query: &WalletQuery) -> Result<Vec<Wallet>>;

    async fn count(&self, query: &WalletQuery) -> Result<u64>;

    /// Insert a new wallet. A non-zero initial balance is recorded as an
    /// opening CREDIT transaction so the balance always equals the sum of
    /// the log. Returns `None` when a wallet for the user already exists
    /// (store-level uniqueness, authoritative across API instances).
    async fn save(&self, wallet: &WalletCreate) -> Result<Option<Wallet>>;

    /// Apply one transaction and its balance effect as a single logical
    /// update: the balance change and the appended log entry commit together
    /// or not at all. Returns `None` (with no state change) when the update
    /// would drive the balance negative.
    async fn update(&self, wallet_id: u64, tx: &TransactionCreate) -> Result<Option<Wallet>>;
}

pub struct PgWalletRepository {
    pool: PgPool,
}

// Postgres unique_violation
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

// PostgreSQL BIGSERIAL is signed, ids are converted i64 <-> u64 here
fn map_wallet(row: &PgRow, transactions: Vec<WalletTransaction>) -> Wallet {
    Wallet {
        id: row.get::<i64, _>("id") as u64,
        user_id: row.get::<i64, _>("user_id") as u64,
        balance: row.get("balance"),
        transactions,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn map_transaction(row: &PgRow) -> Result<WalletTransaction> {
    let tx_type: String = row.get("tx_type");
    Ok(WalletTransaction {
        id: row.get::<i64, _>("id") as u64,
        wallet_id: row.get::<i64, _>("wallet_id") as u64,
        tx_type: TransactionType::parse(&tx_type)
            .with_context(|| format!("Unknown transaction type in store: {}", tx_type))?,
        amount: row.get("amount"),
        description: row.get("description"),
        date: row.get("date"),
    })
}

impl PgWalletRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Load the log in insertion order (BIGSERIAL id preserves chronology)
    async fn load_transactions(&self, wallet_id: i64) -> Result<Vec<WalletTransaction>> {
        let rows = sqlx::query(
            r#"
            SELECT id, wallet_id, tx_type, amount, description, date
            FROM wallet_transactions
            WHERE wallet_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(wallet_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch wallet transactions")?;

        rows.iter().map(map_transaction).collect()
    }

    async fn hydrate(&self, row: PgRow) -> Result<Wallet> {
        let transactions = self.load_transactions(row.get::<i64, _>("id")).await?;
        Ok(map_wallet(&row, transactions))
    }
}

#[async_trait]
impl WalletRepository for PgWalletRepository {
    async fn find_by_user_id(&self, user_id: u64) -> Result<Option<Wallet>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, balance, created_at, updated_at
            FROM wallets
            WHERE user_id = $1
            "#,
        )
        .bind(user_id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch wallet by user id")?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Wallet>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, balance, created_at, updated_at
            FROM wallets
            WHERE id = $1
            "#,
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch wallet by id")?;

        match row {
            Some(row) => Ok(Some(self.hydrate(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self, query: &WalletQuery) -> Result<Vec<Wallet>> {
        let limit = query.limit.unwrap_or(i64::MAX);
        let rows = if let Some(user_id) = query.user_id {
            sqlx::query(
                r#"
                SELECT id, user_id, balance, created_at, updated_at
                FROM wallets
                WHERE user_id = $1
                ORDER BY id ASC
                OFFSET $2 LIMIT $3
                "#,
            )
            .bind(user_id as i64)
            .bind(query.offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query(
                r#"
                SELECT id, user_id, balance, created_at, updated_at
                FROM wallets
                ORDER BY id ASC
                OFFSET $1 LIMIT $2
                "#,
            )
            .bind(query.offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
        }
        .context("Failed to fetch wallets")?;

        let mut wallets = Vec::with_capacity(rows.len());
        for row in rows {
            wallets.push(self.hydrate(row).await?);
        }
        Ok(wallets)
    }

    async fn count(&self, query: &WalletQuery) -> Result<u64> {
        let row = if let Some(user_id) = query.user_id {
            sqlx::query(r#"SELECT COUNT(*) AS cnt FROM wallets WHERE user_id = $1"#)
                .bind(user_id as i64)
                .fetch_one(&self.pool)
                .await
        } else {
            sqlx::query(r#"SELECT COUNT(*) AS cnt FROM wallets"#)
                .fetch_one(&self.pool)
                .await
        }
        .context("Failed to count wallets")?;

        Ok(row.get::<i64, _>("cnt") as u64)
    }

    async fn save(&self, wallet: &WalletCreate) -> Result<Option<Wallet>> {
        let mut db_tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        let now = Utc::now();
        let inserted = sqlx::query(
            r#"
            INSERT INTO wallets (user_id, balance, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING id, user_id, balance, created_at, updated_at
            "#,
        )
        .bind(wallet.user_id as i64)
        .bind(wallet.initial_balance)
        .bind(now)
        .fetch_one(&mut db_tx)
        .await;

        // The user_id unique constraint is the arbiter when two instances
        // race past their own existence checks
        let row = match inserted {
            Ok(row) => row,
            Err(e) if is_unique_violation(&e) => {
                db_tx
                    .rollback()
                    .await
                    .context("Failed to roll back duplicate wallet insert")?;
                return Ok(None);
            }
            Err(e) => return Err(e).context("Failed to create wallet"),
        };

        let wallet_id: i64 = row.get("id");

        // Opening balance enters the log so balance == sum(log) from day one
        if wallet.initial_balance > Decimal::ZERO {
            sqlx::query(
                r#"
                INSERT INTO wallet_transactions (wallet_id, tx_type, amount, description, date)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(wallet_id)
            .bind(TransactionType::Credit.as_str())
            .bind(wallet.initial_balance)
            .bind("Opening balance")
            .bind(now)
            .execute(&mut db_tx)
            .await
            .context("Failed to record opening transaction")?;
        }

        db_tx
            .commit()
            .await
            .context("Failed to commit wallet creation")?;

        let transactions = self.load_transactions(wallet_id).await?;
        Ok(Some(map_wallet(&row, transactions)))
    }

    async fn update(&self, wallet_id: u64, tx: &TransactionCreate) -> Result<Option<Wallet>> {
        let delta = tx.tx_type.signum() * tx.amount;

        let mut db_tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        // The floor re-check in the WHERE clause makes over-debit impossible
        // even if callers race past the service-level lock (e.g. a second
        // API instance against the same database).
        let updated = sqlx::query(
            r#"
            UPDATE wallets
            SET balance = balance + $1, updated_at = $2
            WHERE id = $3 AND balance + $1 >= 0
            RETURNING id
            "#,
        )
        .bind(delta)
        .bind(Utc::now())
        .bind(wallet_id as i64)
        .fetch_optional(&mut db_tx)
        .await
        .context("Failed to update wallet balance")?;

        if updated.is_none() {
            db_tx
                .rollback()
                .await
                .context("Failed to roll back rejected update")?;
            return Ok(None);
        }

        sqlx::query(
            r#"
            INSERT INTO wallet_transactions (wallet_id, tx_type, amount, description, date)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(wallet_id as i64)
        .bind(tx.tx_type.as_str())
        .bind(tx.amount)
        .bind(&tx.description)
        .bind(Utc::now())
        .execute(&mut db_tx)
        .await
        .context("Failed to append wallet transaction")?;

        db_tx
            .commit()
            .await
            .context("Failed to commit wallet update")?;

        self.find_by_id(wallet_id).await
    }
}
