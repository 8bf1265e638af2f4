use crate::domains::order::models::{OrderStatus, TicketOrder, TicketOrderCreate};
use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{postgres::PgRow, PgPool, Row};

pub struct OrderRepository {
    pool: PgPool,
}

fn map_order(row: &PgRow) -> Result<TicketOrder> {
    let status: String = row.get("status");
    Ok(TicketOrder {
        id: row.get::<i64, _>("id") as u64,
        user_id: row.get::<i64, _>("user_id") as u64,
        event_id: row.get::<i64, _>("event_id") as u64,
        tier_id: row.get::<i64, _>("tier_id") as u64,
        quantity: row.get::<i64, _>("quantity") as u64,
        total_amount: row.get("total_amount"),
        payment_order_id: row.get("payment_order_id"),
        status: OrderStatus::parse(&status)
            .with_context(|| format!("Unknown order status in store: {}", status))?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, order: &TicketOrderCreate) -> Result<TicketOrder> {
        let row = sqlx::query(
            r#"
            INSERT INTO ticket_orders
                (user_id, event_id, tier_id, quantity, total_amount, payment_order_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING id, user_id, event_id, tier_id, quantity, total_amount, payment_order_id, status, created_at, updated_at
            "#,
        )
        .bind(order.user_id as i64)
        .bind(order.event_id as i64)
        .bind(order.tier_id as i64)
        .bind(order.quantity as i64)
        .bind(order.total_amount)
        .bind(&order.payment_order_id)
        .bind(order.status.as_str())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .context("Failed to create ticket order")?;

        map_order(&row)
    }

    pub async fn find_by_id(&self, id: u64) -> Result<Option<TicketOrder>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, event_id, tier_id, quantity, total_amount, payment_order_id, status, created_at, updated_at
            FROM ticket_orders
            WHERE id = $1
            "#,
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch order by id")?;

        row.as_ref().map(map_order).transpose()
    }

    pub async fn find_all_by_user(&self, user_id: u64) -> Result<Vec<TicketOrder>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, event_id, tier_id, quantity, total_amount, payment_order_id, status, created_at, updated_at
            FROM ticket_orders
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch orders for user")?;

        rows.iter().map(map_order).collect()
    }
}
