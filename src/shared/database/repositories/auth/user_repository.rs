use crate::domains::auth::models::{User, UserRole};
use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{postgres::PgRow, PgPool, Row};

pub struct UserRepository {
    pool: PgPool,
}

// PostgreSQL BIGSERIAL is signed, ids are converted i64 <-> u64 here
fn map_user(row: &PgRow) -> User {
    User {
        id: row.get::<i64, _>("id") as u64,
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        username: row.get("username"),
        role: UserRole::parse(row.get::<String, _>("role").as_str()),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        username: Option<&str>,
    ) -> Result<User> {
        let row = sqlx::query(
            r#"
            INSERT INTO users (email, password_hash, username, role, created_at, updated_at)
            VALUES ($1, $2, $3, 'user', $4, $5)
            RETURNING id, email, password_hash, username, role, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(username)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .context("Failed to create user")?;

        Ok(map_user(&row))
    }

    // Get user by email (for login)
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, username, role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by email")?;

        Ok(row.as_ref().map(map_user))
    }

    pub async fn get_user_by_id(&self, id: u64) -> Result<Option<User>> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, username, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch user by id")?;

        Ok(row.as_ref().map(map_user))
    }

    // Promote/demote a user (organizer approval path)
    pub async fn update_role(&self, id: u64, role: UserRole) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET role = $1, updated_at = $2
            WHERE id = $3
            "#,
        )
        .bind(role.as_str())
        .bind(Utc::now())
        .bind(id as i64)
        .execute(&self.pool)
        .await
        .context("Failed to update user role")?;

        Ok(())
    }
}
