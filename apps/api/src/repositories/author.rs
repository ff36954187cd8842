//! Author repository for centralized database operations
//!
//! This module provides all author-related database operations in a single
//! location, following the repository pattern. Every write is a single SQL
//! statement; the unique constraint on `name` is the concurrency guard for
//! create operations.

use sqlx::PgPool;
use uuid::Uuid;

use super::utils::AUTHOR_COLUMNS;
use crate::models::Author;

/// Repository for author database operations
#[derive(Clone)]
pub struct AuthorRepository {
    pool: PgPool,
}

impl AuthorRepository {
    /// Create a new AuthorRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get total count of authors
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(&self.pool)
            .await
    }

    /// Find an author by their unique ID
    pub async fn find_by_id(&self, author_id: Uuid) -> Result<Option<Author>, sqlx::Error> {
        let sql = format!("SELECT {} FROM authors WHERE id = $1", AUTHOR_COLUMNS);
        sqlx::query_as::<_, Author>(&sql)
            .bind(author_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Find an author by exact name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Author>, sqlx::Error> {
        let sql = format!("SELECT {} FROM authors WHERE name = $1", AUTHOR_COLUMNS);
        sqlx::query_as::<_, Author>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
    }

    /// Find all authors
    pub async fn find_all(&self) -> Result<Vec<Author>, sqlx::Error> {
        let sql = format!("SELECT {} FROM authors ORDER BY name ASC", AUTHOR_COLUMNS);
        sqlx::query_as::<_, Author>(&sql).fetch_all(&self.pool).await
    }

    /// Find authors by whether any books reference them.
    ///
    /// The membership test runs store-side so the result matches the live
    /// books table at query time.
    pub async fn find_by_has_books(&self, has_books: bool) -> Result<Vec<Author>, sqlx::Error> {
        let predicate = if has_books { "EXISTS" } else { "NOT EXISTS" };
        let sql = format!(
            "SELECT {} FROM authors a \
             WHERE {} (SELECT 1 FROM books b WHERE b.author_id = a.id) \
             ORDER BY a.name ASC",
            AUTHOR_COLUMNS, predicate
        );
        sqlx::query_as::<_, Author>(&sql).fetch_all(&self.pool).await
    }

    /// Create a new author
    ///
    /// Fails with a unique-violation database error when the name is taken.
    pub async fn create(&self, name: &str, born: Option<i32>) -> Result<Author, sqlx::Error> {
        let sql = format!(
            "INSERT INTO authors (name, born) VALUES ($1, $2) RETURNING {}",
            AUTHOR_COLUMNS
        );
        sqlx::query_as::<_, Author>(&sql)
            .bind(name)
            .bind(born)
            .fetch_one(&self.pool)
            .await
    }

    /// Resolve an author by name, creating it (with no birth year) when
    /// absent. A concurrent insert of the same name is recovered by
    /// re-reading, so the author is created exactly once.
    pub async fn find_or_create(&self, name: &str) -> Result<Author, sqlx::Error> {
        if let Some(author) = self.find_by_name(name).await? {
            return Ok(author);
        }

        match self.create(name, None).await {
            Ok(author) => Ok(author),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                // Lost the insert race; the row exists now.
                self.find_by_name(name)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)
            }
            Err(e) => Err(e),
        }
    }

    /// Set an author's birth year by name, atomically.
    ///
    /// Returns `None` when no author with that name exists.
    pub async fn set_born(&self, name: &str, born: i32) -> Result<Option<Author>, sqlx::Error> {
        let sql = format!(
            "UPDATE authors SET born = $2, updated_at = NOW() WHERE name = $1 RETURNING {}",
            AUTHOR_COLUMNS
        );
        sqlx::query_as::<_, Author>(&sql)
            .bind(name)
            .bind(born)
            .fetch_optional(&self.pool)
            .await
    }
}
