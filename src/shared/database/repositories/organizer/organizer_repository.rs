use crate::domains::organizer::models::{ApplicationStatus, OrganizerApplication};
use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{postgres::PgRow, PgPool, Row};

pub struct OrganizerRepository {
    pool: PgPool,
}

fn map_application(row: &PgRow) -> Result<OrganizerApplication> {
    let status: String = row.get("status");
    Ok(OrganizerApplication {
        id: row.get::<i64, _>("id") as u64,
        user_id: row.get::<i64, _>("user_id") as u64,
        organization: row.get("organization"),
        contact_phone: row.get("contact_phone"),
        status: ApplicationStatus::parse(&status)
            .with_context(|| format!("Unknown application status in store: {}", status))?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

impl OrganizerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: u64,
        organization: &str,
        contact_phone: Option<&str>,
    ) -> Result<OrganizerApplication> {
        let row = sqlx::query(
            r#"
            INSERT INTO organizer_applications (user_id, organization, contact_phone, status, created_at, updated_at)
            VALUES ($1, $2, $3, 'pending', $4, $4)
            RETURNING id, user_id, organization, contact_phone, status, created_at, updated_at
            "#,
        )
        .bind(user_id as i64)
        .bind(organization)
        .bind(contact_phone)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .context("Failed to create organizer application")?;

        map_application(&row)
    }

    // A user's pending or approved application blocks a new one
    pub async fn find_live_by_user(&self, user_id: u64) -> Result<Option<OrganizerApplication>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, organization, contact_phone, status, created_at, updated_at
            FROM organizer_applications
            WHERE user_id = $1 AND status IN ('pending', 'approved')
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch live application")?;

        row.as_ref().map(map_application).transpose()
    }

    // Latest application regardless of status (for the /me endpoint)
    pub async fn find_latest_by_user(&self, user_id: u64) -> Result<Option<OrganizerApplication>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, organization, contact_phone, status, created_at, updated_at
            FROM organizer_applications
            WHERE user_id = $1
            ORDER BY id DESC
            LIMIT 1
            "#,
        )
        .bind(user_id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch latest application")?;

        row.as_ref().map(map_application).transpose()
    }

    pub async fn find_by_id(&self, id: u64) -> Result<Option<OrganizerApplication>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, organization, contact_phone, status, created_at, updated_at
            FROM organizer_applications
            WHERE id = $1
            "#,
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch application by id")?;

        row.as_ref().map(map_application).transpose()
    }

    pub async fn update_status(
        &self,
        id: u64,
        status: ApplicationStatus,
    ) -> Result<OrganizerApplication> {
        let row = sqlx::query(
            r#"
            UPDATE organizer_applications
            SET status = $1, updated_at = $2
            WHERE id = $3
            RETURNING id, user_id, organization, contact_phone, status, created_at, updated_at
            "#,
        )
        .bind(status.as_str())
        .bind(Utc::now())
        .bind(id as i64)
        .fetch_one(&self.pool)
        .await
        .context("Failed to update application status")?;

        map_application(&row)
    }
}
