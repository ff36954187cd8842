//! Book GraphQL type
//!
//! This module defines the GraphQL type for books with the author
//! relationship resolver.

use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::loaders::AuthorLoader;
use crate::models::Book as DbBook;

use super::author::Author;

/// Book information exposed via GraphQL
pub struct Book {
    inner: DbBook,
}

impl Book {
    /// Create a new GraphQL Book from a database Book
    pub fn new(book: DbBook) -> Self {
        Self { inner: book }
    }
}

impl From<DbBook> for Book {
    fn from(book: DbBook) -> Self {
        Self::new(book)
    }
}

#[Object]
impl Book {
    /// Unique book identifier
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Book title
    async fn title(&self) -> &str {
        &self.inner.title
    }

    /// Publication year
    async fn published(&self) -> i32 {
        self.inner.published
    }

    /// Genre tags
    async fn genres(&self) -> &[String] {
        &self.inner.genres
    }

    /// The book's author (uses DataLoader for batched fetching)
    ///
    /// The foreign key on the books table keeps the reference from
    /// dangling, so a missing author here is a store inconsistency.
    async fn author(&self, ctx: &Context<'_>) -> Result<Author> {
        let loader = ctx.data::<DataLoader<AuthorLoader>>()?;
        let author = loader
            .load_one(self.inner.author_id)
            .await?
            .ok_or_else(|| async_graphql::Error::new("author not found"))?;
        Ok(Author::from(author))
    }
}
