use crate::domains::auth::models::{Claims, User};
use crate::shared::errors::AuthError;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};

const ACCESS_TOKEN_HOURS: i64 = 24;

/// JWT service: access token issue/verify plus refresh token generation and
/// hashing (only the hash is ever persisted).
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new(secret: String) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
        }
    }

    pub fn generate_access_token(&self, user: &User) -> Result<String, AuthError> {
        let claims = Claims::new(user.id, user.email.clone(), user.role, ACCESS_TOKEN_HOURS);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to generate token: {}", e)))
    }

    pub fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(token_data.claims)
    }

    /// Random opaque refresh token; the raw value goes to the client only.
    pub fn generate_refresh_token(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect()
    }

    /// sha256 hex of a refresh token, the form stored in the database.
    pub fn hash_refresh_token(&self, token: &str) -> String {
        let digest = Sha256::digest(token.as_bytes());
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::auth::models::UserRole;
    use chrono::Utc;

    fn test_user() -> User {
        User {
            id: 7,
            email: "a@b.c".into(),
            password_hash: "x".into(),
            username: None,
            role: UserRole::User,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn access_token_round_trips() {
        let svc = JwtService::new("test-secret".into());
        let token = svc.generate_access_token(&test_user()).unwrap();
        let claims = svc.verify_access_token(&token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.role, UserRole::User);
    }

    #[test]
    fn tampered_token_is_rejected() {
        let svc = JwtService::new("test-secret".into());
        let other = JwtService::new("other-secret".into());
        let token = svc.generate_access_token(&test_user()).unwrap();
        assert!(other.verify_access_token(&token).is_err());
    }

    #[test]
    fn refresh_token_hash_is_stable() {
        let svc = JwtService::new("s".into());
        let token = svc.generate_refresh_token();
        assert_eq!(token.len(), 64);
        assert_eq!(svc.hash_refresh_token(&token), svc.hash_refresh_token(&token));
        assert_ne!(svc.hash_refresh_token(&token), token);
    }
}
