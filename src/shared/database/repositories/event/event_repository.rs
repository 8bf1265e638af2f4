use crate::domains::event::models::{Event, TicketTier};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{postgres::PgRow, PgPool, Row};

pub struct EventRepository {
    pool: PgPool,
}

/// Data for inserting an event with its tiers
#[derive(Debug)]
pub struct EventCreate {
    pub organizer_id: u64,
    pub title: String,
    pub description: String,
    pub venue: String,
    pub category: String,
    pub starts_at: DateTime<Utc>,
    pub tiers: Vec<TierCreate>,
}

#[derive(Debug)]
pub struct TierCreate {
    pub name: String,
    pub price: Decimal,
    pub quantity: u64,
}

fn map_event(row: &PgRow) -> Event {
    Event {
        id: row.get::<i64, _>("id") as u64,
        organizer_id: row.get::<i64, _>("organizer_id") as u64,
        title: row.get("title"),
        description: row.get("description"),
        venue: row.get("venue"),
        category: row.get("category"),
        starts_at: row.get("starts_at"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn map_tier(row: &PgRow) -> TicketTier {
    TicketTier {
        id: row.get::<i64, _>("id") as u64,
        event_id: row.get::<i64, _>("event_id") as u64,
        name: row.get("name"),
        price: row.get("price"),
        quantity: row.get::<i64, _>("quantity") as u64,
        sold: row.get::<i64, _>("sold") as u64,
    }
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Event and its tiers are inserted in one transaction
    pub async fn create(&self, event: &EventCreate) -> Result<(Event, Vec<TicketTier>)> {
        let mut db_tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin transaction")?;

        let now = Utc::now();
        let event_row = sqlx::query(
            r#"
            INSERT INTO events (organizer_id, title, description, venue, category, starts_at, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING id, organizer_id, title, description, venue, category, starts_at, created_at, updated_at
            "#,
        )
        .bind(event.organizer_id as i64)
        .bind(&event.title)
        .bind(&event.description)
        .bind(&event.venue)
        .bind(&event.category)
        .bind(event.starts_at)
        .bind(now)
        .fetch_one(&mut db_tx)
        .await
        .context("Failed to create event")?;

        let event_id: i64 = event_row.get("id");

        let mut tiers = Vec::with_capacity(event.tiers.len());
        for tier in &event.tiers {
            let tier_row = sqlx::query(
                r#"
                INSERT INTO ticket_tiers (event_id, name, price, quantity, sold)
                VALUES ($1, $2, $3, $4, 0)
                RETURNING id, event_id, name, price, quantity, sold
                "#,
            )
            .bind(event_id)
            .bind(&tier.name)
            .bind(tier.price)
            .bind(tier.quantity as i64)
            .fetch_one(&mut db_tx)
            .await
            .context("Failed to create ticket tier")?;

            tiers.push(map_tier(&tier_row));
        }

        db_tx
            .commit()
            .await
            .context("Failed to commit event creation")?;

        Ok((map_event(&event_row), tiers))
    }

    pub async fn find_by_id(&self, id: u64) -> Result<Option<Event>> {
        let row = sqlx::query(
            r#"
            SELECT id, organizer_id, title, description, venue, category, starts_at, created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch event by id")?;

        Ok(row.as_ref().map(map_event))
    }

    // Public listing, newest events first
    pub async fn list(
        &self,
        offset: i64,
        limit: i64,
        category: Option<&str>,
    ) -> Result<Vec<Event>> {
        let rows = if let Some(category) = category {
            sqlx::query(
                r#"
                SELECT id, organizer_id, title, description, venue, category, starts_at, created_at, updated_at
                FROM events
                WHERE category = $1
                ORDER BY starts_at ASC
                OFFSET $2 LIMIT $3
                "#,
            )
            .bind(category)
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query(
                r#"
                SELECT id, organizer_id, title, description, venue, category, starts_at, created_at, updated_at
                FROM events
                ORDER BY starts_at ASC
                OFFSET $1 LIMIT $2
                "#,
            )
            .bind(offset)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
        }
        .context("Failed to list events")?;

        Ok(rows.iter().map(map_event).collect())
    }

    pub async fn count(&self, category: Option<&str>) -> Result<u64> {
        let row = if let Some(category) = category {
            sqlx::query(r#"SELECT COUNT(*) AS cnt FROM events WHERE category = $1"#)
                .bind(category)
                .fetch_one(&self.pool)
                .await
        } else {
            sqlx::query(r#"SELECT COUNT(*) AS cnt FROM events"#)
                .fetch_one(&self.pool)
                .await
        }
        .context("Failed to count events")?;

        Ok(row.get::<i64, _>("cnt") as u64)
    }

    pub async fn tiers_for_event(&self, event_id: u64) -> Result<Vec<TicketTier>> {
        let rows = sqlx::query(
            r#"
            SELECT id, event_id, name, price, quantity, sold
            FROM ticket_tiers
            WHERE event_id = $1
            ORDER BY price ASC
            "#,
        )
        .bind(event_id as i64)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch ticket tiers")?;

        Ok(rows.iter().map(map_tier).collect())
    }

    pub async fn find_tier(&self, tier_id: u64) -> Result<Option<TicketTier>> {
        let row = sqlx::query(
            r#"
            SELECT id, event_id, name, price, quantity, sold
            FROM ticket_tiers
            WHERE id = $1
            "#,
        )
        .bind(tier_id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch ticket tier")?;

        Ok(row.as_ref().map(map_tier))
    }

    /// Atomically take `quantity` tickets from a tier.
    /// The capacity check lives in the WHERE clause, so two racing orders
    /// can never oversell; returns `None` when not enough tickets remain.
    pub async fn reserve_tickets(
        &self,
        tier_id: u64,
        quantity: u64,
    ) -> Result<Option<TicketTier>> {
        let row = sqlx::query(
            r#"
            UPDATE ticket_tiers
            SET sold = sold + $1
            WHERE id = $2 AND sold + $1 <= quantity
            RETURNING id, event_id, name, price, quantity, sold
            "#,
        )
        .bind(quantity as i64)
        .bind(tier_id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to reserve tickets")?;

        Ok(row.as_ref().map(map_tier))
    }

    /// Give back a reservation after a failed payment.
    pub async fn release_tickets(&self, tier_id: u64, quantity: u64) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE ticket_tiers
            SET sold = sold - $1
            WHERE id = $2 AND sold >= $1
            "#,
        )
        .bind(quantity as i64)
        .bind(tier_id as i64)
        .execute(&self.pool)
        .await
        .context("Failed to release tickets")?;

        Ok(())
    }
}
