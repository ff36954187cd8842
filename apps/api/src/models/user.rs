//! User and authentication models for Libris
//!
//! This module contains the database model for user accounts and the JWT
//! claims embedded in signed tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User account from the users table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,

    /// Username (unique)
    pub username: String,

    /// Argon2id hash of the user's password credential
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// The user's favorite genre
    pub favorite_genre: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// JWT claims for a signed token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: Uuid,

    /// Username at signing time
    pub username: String,

    /// Issued at timestamp (Unix epoch)
    pub iat: i64,

    /// Expiration timestamp (Unix epoch)
    pub exp: i64,

    /// Issuer
    #[serde(default = "default_issuer")]
    pub iss: String,
}

fn default_issuer() -> String {
    "libris".to_string()
}

impl Claims {
    /// Create new claims asserting the given user's identity
    pub fn new(user: &User, token_ttl_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user.id,
            username: user.username.clone(),
            iat: now,
            exp: now + token_ttl_secs,
            iss: default_issuer(),
        }
    }

    /// Check whether the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}
