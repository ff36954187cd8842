//! Catalog queries for the Libris GraphQL API
//!
//! This module provides queries for browsing the catalog:
//! - Counts of books and authors
//! - Book listings with author/genre filters
//! - Author listings and lookups

use async_graphql::{Context, Object, Result};

use crate::graphql::types::{Author, Book, HasBooks};
use crate::repositories::{AuthorRepository, BookRepository};

/// Catalog browsing queries over authors and books
#[derive(Default)]
pub struct CatalogQuery;

#[Object]
impl CatalogQuery {
    /// Total number of books in the catalog
    async fn book_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let repo = ctx.data::<BookRepository>()?;
        let count = repo.count().await?;
        Ok(count as i32)
    }

    /// Total number of authors in the catalog
    async fn author_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let repo = ctx.data::<AuthorRepository>()?;
        let count = repo.count().await?;
        Ok(count as i32)
    }

    /// All books, optionally narrowed to an exact author name and to a
    /// genre. Both filters apply together when given.
    async fn all_books(
        &self,
        ctx: &Context<'_>,
        author: Option<String>,
        genre: Option<String>,
    ) -> Result<Vec<Book>> {
        let repo = ctx.data::<BookRepository>()?;
        let books = repo
            .find_filtered(author.as_deref(), genre.as_deref())
            .await?;
        Ok(books.into_iter().map(Book::from).collect())
    }

    /// All authors, optionally filtered by whether any books reference them
    async fn all_authors(
        &self,
        ctx: &Context<'_>,
        has_books: Option<HasBooks>,
    ) -> Result<Vec<Author>> {
        let repo = ctx.data::<AuthorRepository>()?;
        let authors = match has_books {
            Some(HasBooks::Yes) => repo.find_by_has_books(true).await?,
            Some(HasBooks::No) => repo.find_by_has_books(false).await?,
            None => repo.find_all().await?,
        };
        Ok(authors.into_iter().map(Author::from).collect())
    }

    /// Look up a single author by exact name
    async fn find_author(&self, ctx: &Context<'_>, name: String) -> Result<Option<Author>> {
        let repo = ctx.data::<AuthorRepository>()?;
        let author = repo.find_by_name(&name).await?;
        Ok(author.map(Author::from))
    }
}
