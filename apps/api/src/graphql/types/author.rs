//! Author GraphQL type
//!
//! This module defines the GraphQL type for authors, including the derived
//! book count.

use async_graphql::{Context, Enum, Object, Result};
use uuid::Uuid;

use crate::models::Author as DbAuthor;
use crate::repositories::BookRepository;

/// Filter for authors by whether any books reference them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum HasBooks {
    /// Only authors with at least one book
    Yes,
    /// Only authors with no books
    No,
}

/// Author information exposed via GraphQL
pub struct Author {
    inner: DbAuthor,
}

impl Author {
    /// Create a new GraphQL Author from a database Author
    pub fn new(author: DbAuthor) -> Self {
        Self { inner: author }
    }
}

impl From<DbAuthor> for Author {
    fn from(author: DbAuthor) -> Self {
        Self::new(author)
    }
}

#[Object]
impl Author {
    /// Unique author identifier
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Author name
    async fn name(&self) -> &str {
        &self.inner.name
    }

    /// Birth year, when known
    async fn born(&self) -> Option<i32> {
        self.inner.born
    }

    /// Number of books referencing this author.
    ///
    /// Always a fresh count against the books table; the value is never
    /// stored on the author record, so it cannot drift from the collection.
    async fn book_count(&self, ctx: &Context<'_>) -> Result<i32> {
        let repo = ctx.data::<BookRepository>()?;
        let count = repo.count_by_author(self.inner.id).await?;
        Ok(count as i32)
    }
}
