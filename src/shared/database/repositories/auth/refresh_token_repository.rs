use crate::domains::auth::models::{RefreshToken, RefreshTokenCreate};
use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{postgres::PgRow, PgPool, Row};

pub struct RefreshTokenRepository {
    pool: PgPool,
}

fn map_token(row: &PgRow) -> RefreshToken {
    RefreshToken {
        id: row.get::<i64, _>("id") as u64,
        user_id: row.get::<i64, _>("user_id") as u64,
        token_hash: row.get("token_hash"),
        expires_at: row.get("expires_at"),
        revoked: row.get("revoked"),
        created_at: row.get("created_at"),
    }
}

impl RefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, token: RefreshTokenCreate) -> Result<RefreshToken> {
        let row = sqlx::query(
            r#"
            INSERT INTO refresh_tokens (user_id, token_hash, expires_at, revoked, created_at)
            VALUES ($1, $2, $3, FALSE, $4)
            RETURNING id, user_id, token_hash, expires_at, revoked, created_at
            "#,
        )
        .bind(token.user_id as i64)
        .bind(&token.token_hash)
        .bind(token.expires_at)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .context("Failed to create refresh token")?;

        Ok(map_token(&row))
    }

    pub async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<RefreshToken>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, token_hash, expires_at, revoked, created_at
            FROM refresh_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch refresh token")?;

        Ok(row.as_ref().map(map_token))
    }

    pub async fn revoke(&self, token_hash: &str) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked = TRUE
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .execute(&self.pool)
        .await
        .context("Failed to revoke refresh token")?;

        Ok(())
    }

    // New signin ends previous sessions
    pub async fn revoke_all_for_user(&self, user_id: u64) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked = TRUE
            WHERE user_id = $1 AND revoked = FALSE
            "#,
        )
        .bind(user_id as i64)
        .execute(&self.pool)
        .await
        .context("Failed to revoke refresh tokens for user")?;

        Ok(())
    }
}
