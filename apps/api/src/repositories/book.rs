//! Book repository for centralized database operations
//!
//! This module provides all book-related database operations in a single
//! location, following the repository pattern.

use sqlx::PgPool;
use uuid::Uuid;

use super::utils::{BOOK_COLUMNS, BOOK_COLUMNS_QUALIFIED};
use crate::models::Book;

/// Repository for book database operations
#[derive(Clone)]
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    /// Create a new BookRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get total count of books
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await
    }

    /// Count books referencing an author.
    ///
    /// This is the live relational count behind `Author.bookCount`; it is
    /// never persisted on the author record.
    pub async fn count_by_author(&self, author_id: Uuid) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE author_id = $1")
            .bind(author_id)
            .fetch_one(&self.pool)
            .await
    }

    /// Find a book by exact title
    pub async fn find_by_title(&self, title: &str) -> Result<Option<Book>, sqlx::Error> {
        let sql = format!("SELECT {} FROM books WHERE title = $1", BOOK_COLUMNS);
        sqlx::query_as::<_, Book>(&sql)
            .bind(title)
            .fetch_optional(&self.pool)
            .await
    }

    /// Find books, optionally narrowed by exact author name and by genre
    /// membership. Both filters are conjunctive and evaluated store-side in
    /// a single join, so the result matches the live tables at query time.
    pub async fn find_filtered(
        &self,
        author_name: Option<&str>,
        genre: Option<&str>,
    ) -> Result<Vec<Book>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM books b \
             JOIN authors a ON a.id = b.author_id \
             WHERE ($1::text IS NULL OR a.name = $1) \
               AND ($2::text IS NULL OR $2 = ANY(b.genres)) \
             ORDER BY b.title ASC",
            BOOK_COLUMNS_QUALIFIED
        );
        sqlx::query_as::<_, Book>(&sql)
            .bind(author_name)
            .bind(genre)
            .fetch_all(&self.pool)
            .await
    }

    /// Create a new book referencing an existing author
    ///
    /// Fails with a unique-violation database error when the title is taken;
    /// the foreign key on `author_id` rejects dangling references.
    pub async fn create(
        &self,
        title: &str,
        published: i32,
        author_id: Uuid,
        genres: &[String],
    ) -> Result<Book, sqlx::Error> {
        let sql = format!(
            "INSERT INTO books (title, published, author_id, genres) \
             VALUES ($1, $2, $3, $4) RETURNING {}",
            BOOK_COLUMNS
        );
        sqlx::query_as::<_, Book>(&sql)
            .bind(title)
            .bind(published)
            .bind(author_id)
            .bind(genres)
            .fetch_one(&self.pool)
            .await
    }
}
