//! Catalog mutations for the Libris GraphQL API
//!
//! This module provides the token-gated catalog writes:
//! - addBook: Insert a book, implicitly creating its author when unknown
//! - addAuthor: Insert an author
//! - editAuthor: Set an author's birth year
//!
//! Each mutation resolves the authentication gate before touching the
//! store, and every write is awaited to completion before a success value
//! is returned.

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::error::ApiError;
use crate::graphql::types::{Author, Book};
use crate::middleware::AuthContext;
use crate::repositories::{AuthorRepository, BookRepository};

/// Token-gated catalog mutations
#[derive(Default)]
pub struct CatalogMutation;

#[Object]
impl CatalogMutation {
    /// Add a book to the catalog
    ///
    /// The named author is resolved by exact name and created (with no
    /// birth year) when absent.
    ///
    /// # Errors
    /// - `UNAUTHORIZED` when the request carries no valid credential
    /// - `VALIDATION_ERROR` when the author name is empty
    /// - `CONFLICT` when a book with the same title already exists
    async fn add_book(
        &self,
        ctx: &Context<'_>,
        title: String,
        published: i32,
        author: String,
        genres: Option<Vec<String>>,
    ) -> Result<Book> {
        let auth = ctx.data::<AuthContext>()?;
        auth.require_user().map_err(|e| e.extend())?;

        if author.trim().is_empty() {
            return Err(
                ApiError::ValidationError("author name must not be empty".to_string()).extend(),
            );
        }

        let author_repo = ctx.data::<AuthorRepository>()?;
        let book_repo = ctx.data::<BookRepository>()?;

        if book_repo.find_by_title(&title).await?.is_some() {
            return Err(ApiError::conflict("book", title.as_str()).extend());
        }

        let author_record = author_repo
            .find_or_create(&author)
            .await
            .map_err(|e| ApiError::store("author", author.as_str(), e).extend())?;

        // The title's unique constraint backstops the existence check above
        // against concurrent inserts.
        let genres = genres.unwrap_or_default();
        let book = book_repo
            .create(&title, published, author_record.id, &genres)
            .await
            .map_err(|e| ApiError::store("book", title.as_str(), e).extend())?;

        tracing::info!(book_id = %book.id, title = %book.title, "Book added");

        Ok(Book::from(book))
    }

    /// Add an author to the catalog
    ///
    /// # Errors
    /// - `UNAUTHORIZED` when the request carries no valid credential
    /// - `VALIDATION_ERROR` when the name is empty
    /// - `CONFLICT` when an author with the same name already exists
    async fn add_author(
        &self,
        ctx: &Context<'_>,
        name: String,
        born: Option<i32>,
    ) -> Result<Author> {
        let auth = ctx.data::<AuthContext>()?;
        auth.require_user().map_err(|e| e.extend())?;

        if name.trim().is_empty() {
            return Err(
                ApiError::ValidationError("author name must not be empty".to_string()).extend(),
            );
        }

        let repo = ctx.data::<AuthorRepository>()?;
        let author = repo
            .create(&name, born)
            .await
            .map_err(|e| ApiError::store("author", name.as_str(), e).extend())?;

        tracing::info!(author_id = %author.id, name = %author.name, "Author added");

        Ok(Author::from(author))
    }

    /// Set an author's birth year
    ///
    /// # Errors
    /// - `UNAUTHORIZED` when the request carries no valid credential
    /// - `VALIDATION_ERROR` when the name is empty
    /// - `NOT_FOUND` when no author with that name exists
    async fn edit_author(
        &self,
        ctx: &Context<'_>,
        name: String,
        set_born_to: i32,
    ) -> Result<Author> {
        let auth = ctx.data::<AuthContext>()?;
        auth.require_user().map_err(|e| e.extend())?;

        if name.trim().is_empty() {
            return Err(
                ApiError::ValidationError("author name must not be empty".to_string()).extend(),
            );
        }

        let repo = ctx.data::<AuthorRepository>()?;
        let author = repo
            .set_born(&name, set_born_to)
            .await
            .map_err(|e| ApiError::store("author", name.as_str(), e).extend())?
            .ok_or_else(|| ApiError::not_found("author", name.as_str()).extend())?;

        tracing::info!(author_id = %author.id, name = %author.name, "Author updated");

        Ok(Author::from(author))
    }
}
