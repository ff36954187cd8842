//! User repository for centralized database operations
//!
//! This module provides all user-related database operations in a single
//! location, following the repository pattern.

use sqlx::PgPool;
use uuid::Uuid;

use super::utils::USER_COLUMNS;
use crate::models::User;

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new UserRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by their unique ID
    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Find a user by exact username
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, sqlx::Error> {
        let sql = format!("SELECT {} FROM users WHERE username = $1", USER_COLUMNS);
        sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await
    }

    /// Create a new user
    ///
    /// Fails with a unique-violation database error when the username is
    /// taken.
    pub async fn create(
        &self,
        username: &str,
        favorite_genre: &str,
        password_hash: &str,
    ) -> Result<User, sqlx::Error> {
        let sql = format!(
            "INSERT INTO users (username, favorite_genre, password_hash) \
             VALUES ($1, $2, $3) RETURNING {}",
            USER_COLUMNS
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .bind(favorite_genre)
            .bind(password_hash)
            .fetch_one(&self.pool)
            .await
    }
}
