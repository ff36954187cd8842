//! Authentication service for Libris
//!
//! This module provides the opaque credential service used by the resolvers:
//! - JWT token signing and verification
//! - Argon2id password hashing and verification
//!
//! The service never touches the store; resolving a token subject to a user
//! record is the auth context builder's job.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::error::{ApiError, ApiResult};
use crate::models::user::Claims;
use crate::models::User;

/// Authentication service configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// Initial password credential for newly created accounts
    pub bootstrap_password: String,
    /// Token TTL in seconds (default: 7 days)
    pub token_ttl_secs: i64,
    /// JWT issuer
    pub issuer: String,
}

impl AuthConfig {
    /// Create a new AuthConfig with the default TTL
    pub fn new(jwt_secret: String, bootstrap_password: String) -> Self {
        Self {
            jwt_secret,
            bootstrap_password,
            token_ttl_secs: 7 * 24 * 3600, // 7 days
            issuer: "libris".to_string(),
        }
    }

    /// Create AuthConfig from an expiry string (e.g., "15m", "7d")
    pub fn with_expiry_string(
        jwt_secret: String,
        bootstrap_password: String,
        expiry: &str,
    ) -> Self {
        Self {
            jwt_secret,
            bootstrap_password,
            token_ttl_secs: parse_duration_string(expiry).unwrap_or(7 * 24 * 3600),
            issuer: "libris".to_string(),
        }
    }
}

/// Parse duration strings like "15m", "7d", "24h" to seconds
fn parse_duration_string(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let (num_str, unit) = s.split_at(s.len() - 1);
    let num: i64 = num_str.parse().ok()?;

    match unit {
        "s" => Some(num),
        "m" => Some(num * 60),
        "h" => Some(num * 3600),
        "d" => Some(num * 24 * 3600),
        "w" => Some(num * 7 * 24 * 3600),
        _ => None,
    }
}

/// Authentication service providing token signing/verification and
/// credential hashing
#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
    argon2: Argon2<'static>,
    /// Pre-computed dummy hash verified when a login names no existing
    /// user, keeping response times uniform across both cases.
    dummy_password_hash: String,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(config: AuthConfig) -> Self {
        let argon2 = Argon2::default();

        let dummy_salt = SaltString::generate(&mut OsRng);
        let dummy_password_hash = argon2
            .hash_password(b"dummy-password-for-timing-uniformity", &dummy_salt)
            .expect("dummy password hashing should not fail")
            .to_string();

        Self {
            config,
            argon2,
            dummy_password_hash,
        }
    }

    /// Sign a token asserting the given user's identity
    pub fn sign_token(&self, user: &User) -> ApiResult<String> {
        let claims = Claims::new(user, self.config.token_ttl_secs);

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret.as_bytes()),
        )?;

        Ok(token)
    }

    /// Verify a token and return its claims
    ///
    /// # Errors
    /// - `ApiError::InvalidToken` if the token is invalid, expired, or
    ///   malformed
    pub fn verify_token(&self, token: &str) -> ApiResult<Claims> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "Token verification failed");
            ApiError::InvalidToken(e.to_string())
        })?;

        Ok(token_data.claims)
    }

    /// Hash a password with Argon2id
    pub fn hash_password(&self, password: &str) -> ApiResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Verify a password against an Argon2id hash
    pub fn verify_password(&self, password: &str, hash: &str) -> ApiResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| ApiError::Internal(format!("Invalid password hash format: {}", e)))?;

        Ok(self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Verify against the dummy hash, discarding the result.
    ///
    /// Called when a login names no existing user so that the request takes
    /// the same time as a real verification.
    pub fn dummy_verify(&self, password: &str) {
        let _ = self.verify_password(password, &self.dummy_password_hash);
    }

    /// Hash of the configured bootstrap password, seeded into new accounts.
    ///
    /// The credential check at login stays a real per-user hash comparison;
    /// only the initial value is shared.
    pub fn initial_password_hash(&self) -> ApiResult<String> {
        self.hash_password(&self.config.bootstrap_password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn test_service(ttl_secs: i64) -> AuthService {
        let mut config = AuthConfig::new(
            "test-jwt-secret-for-unit-tests-minimum-32-chars".to_string(),
            "secret".to_string(),
        );
        config.token_ttl_secs = ttl_secs;
        AuthService::new(config)
    }

    fn test_user() -> User {
        let now = Utc::now();
        User {
            id: Uuid::new_v4(),
            username: "joni".to_string(),
            password_hash: "unused".to_string(),
            favorite_genre: "fantasy".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_parse_duration_string() {
        assert_eq!(parse_duration_string("15m"), Some(900));
        assert_eq!(parse_duration_string("7d"), Some(604800));
        assert_eq!(parse_duration_string("24h"), Some(86400));
        assert_eq!(parse_duration_string("30s"), Some(30));
        assert_eq!(parse_duration_string("1w"), Some(604800));
        assert_eq!(parse_duration_string(""), None);
        assert_eq!(parse_duration_string("invalid"), None);
        assert_eq!(parse_duration_string("15x"), None);
    }

    #[test]
    fn test_auth_config_defaults() {
        let config = AuthConfig::new("secret".to_string(), "secret".to_string());
        assert_eq!(config.token_ttl_secs, 7 * 24 * 3600);
        assert_eq!(config.issuer, "libris");
    }

    #[test]
    fn test_auth_config_invalid_expiry_uses_default() {
        let config = AuthConfig::with_expiry_string(
            "secret".to_string(),
            "secret".to_string(),
            "invalid",
        );
        assert_eq!(config.token_ttl_secs, 7 * 24 * 3600);
    }

    #[test]
    fn test_sign_and_verify_round_trip() {
        let service = test_service(3600);
        let user = test_user();

        let token = service.sign_token(&user).expect("signing should succeed");
        let claims = service
            .verify_token(&token)
            .expect("verification should succeed");

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.username, user.username);
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let service = test_service(3600);
        let user = test_user();
        let token = service.sign_token(&user).expect("signing should succeed");

        let other = AuthService::new(AuthConfig::new(
            "a-completely-different-secret-of-32-chars".to_string(),
            "secret".to_string(),
        ));
        let result = other.verify_token(&token);
        assert!(matches!(result, Err(ApiError::InvalidToken(_))));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // jsonwebtoken's default validation has 60 seconds of leeway, so the
        // token must be well past its expiry.
        let service = test_service(-120);
        let user = test_user();
        let token = service.sign_token(&user).expect("signing should succeed");

        let result = service.verify_token(&token);
        assert!(matches!(result, Err(ApiError::InvalidToken(_))));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let service = test_service(3600);
        let result = service.verify_token("not-a-token");
        assert!(matches!(result, Err(ApiError::InvalidToken(_))));
    }

    #[test]
    fn test_password_hash_and_verify() {
        let service = test_service(3600);
        let hash = service
            .hash_password("correct horse battery staple")
            .expect("hashing should succeed");

        assert!(service
            .verify_password("correct horse battery staple", &hash)
            .unwrap());
        assert!(!service.verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_initial_password_hash_matches_bootstrap() {
        let service = test_service(3600);
        let hash = service
            .initial_password_hash()
            .expect("hashing should succeed");

        assert!(service.verify_password("secret", &hash).unwrap());
        assert!(!service.verify_password("not-the-secret", &hash).unwrap());
    }
}
