use crate::domains::auth::models::{RefreshTokenCreate, SigninRequest, SignupRequest, User};
use crate::domains::auth::services::JwtService;
use crate::shared::database::{Database, RefreshTokenRepository, UserRepository};
use crate::shared::errors::AuthError;
use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::{Duration, Utc};

const REFRESH_TOKEN_DAYS: i64 = 7;

/// Authentication business logic: signup, signin, token rotation, logout.
#[derive(Clone)]
pub struct AuthService {
    db: Database,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(db: Database, jwt_service: JwtService) -> Self {
        Self { db, jwt_service }
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<User, AuthError> {
        let user_repo = UserRepository::new(self.db.pool().clone());

        let existing = user_repo
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to check email: {}", e)))?;
        if existing.is_some() {
            return Err(AuthError::EmailAlreadyExists {
                email: request.email,
            });
        }

        let password_hash = Self::hash_password(&request.password)?;

        let user = user_repo
            .create_user(&request.email, &password_hash, request.username.as_deref())
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to create user: {}", e)))?;

        tracing::info!(user_id = user.id, "User signed up");
        Ok(user)
    }

    /// Returns the user plus a fresh refresh token. Previous refresh tokens
    /// are revoked, ending older sessions.
    pub async fn signin(&self, request: SigninRequest) -> Result<(User, String), AuthError> {
        let user_repo = UserRepository::new(self.db.pool().clone());

        let user = user_repo
            .get_user_by_email(&request.email)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to fetch user: {}", e)))?
            .ok_or(AuthError::InvalidCredentials)?;

        Self::verify_password(&request.password, &user.password_hash)?;

        let refresh_token_repo = RefreshTokenRepository::new(self.db.pool().clone());
        refresh_token_repo
            .revoke_all_for_user(user.id)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to revoke tokens: {}", e)))?;

        let refresh_token = self.create_refresh_token(user.id).await?;

        Ok((user, refresh_token))
    }

    pub async fn create_refresh_token(&self, user_id: u64) -> Result<String, AuthError> {
        let refresh_token_repo = RefreshTokenRepository::new(self.db.pool().clone());

        let refresh_token = self.jwt_service.generate_refresh_token();
        let token_hash = self.jwt_service.hash_refresh_token(&refresh_token);
        let expires_at = Utc::now() + Duration::days(REFRESH_TOKEN_DAYS);

        refresh_token_repo
            .create(RefreshTokenCreate {
                user_id,
                token_hash,
                expires_at,
            })
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to store refresh token: {}", e)))?;

        Ok(refresh_token)
    }

    /// Rotate: verify the presented refresh token, revoke it, issue a new
    /// access + refresh pair.
    pub async fn refresh_access_token(
        &self,
        refresh_token: &str,
    ) -> Result<(String, String), AuthError> {
        let refresh_token_repo = RefreshTokenRepository::new(self.db.pool().clone());
        let token_hash = self.jwt_service.hash_refresh_token(refresh_token);

        let stored = refresh_token_repo
            .find_by_token_hash(&token_hash)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to find refresh token: {}", e)))?
            .ok_or(AuthError::InvalidToken)?;

        if stored.revoked || stored.expires_at < Utc::now() {
            return Err(AuthError::InvalidToken);
        }

        let user = self.get_user(stored.user_id).await?;

        refresh_token_repo
            .revoke(&token_hash)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to revoke token: {}", e)))?;

        let access_token = self.jwt_service.generate_access_token(&user)?;
        let new_refresh_token = self.create_refresh_token(user.id).await?;

        Ok((access_token, new_refresh_token))
    }

    pub async fn logout(&self, refresh_token: &str) -> Result<(), AuthError> {
        let refresh_token_repo = RefreshTokenRepository::new(self.db.pool().clone());
        let token_hash = self.jwt_service.hash_refresh_token(refresh_token);

        refresh_token_repo
            .revoke(&token_hash)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to revoke token: {}", e)))
    }

    pub async fn get_user(&self, user_id: u64) -> Result<User, AuthError> {
        let user_repo = UserRepository::new(self.db.pool().clone());

        user_repo
            .get_user_by_id(user_id)
            .await
            .map_err(|e| AuthError::DatabaseError(format!("Failed to fetch user: {}", e)))?
            .ok_or(AuthError::UserNotFound { id: user_id })
    }

    fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::PasswordHashingFailed(e.to_string()))
    }

    fn verify_password(password: &str, password_hash: &str) -> Result<(), AuthError> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| AuthError::PasswordVerificationFailed(e.to_string()))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| AuthError::InvalidCredentials)
    }
}
