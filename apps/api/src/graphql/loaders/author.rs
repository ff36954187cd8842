//! Author DataLoader for batched fetching
//!
//! This loader batches multiple author ID lookups into a single database
//! query, solving the N+1 problem when resolving the author for every book
//! in a listing.

use async_graphql::dataloader::Loader;
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::Author;
use crate::repositories::utils::AUTHOR_COLUMNS;

/// DataLoader for batching author queries
#[derive(Clone)]
pub struct AuthorLoader {
    pool: PgPool,
}

impl AuthorLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl Loader<Uuid> for AuthorLoader {
    type Value = Author;
    type Error = Arc<sqlx::Error>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        let sql = format!("SELECT {} FROM authors WHERE id = ANY($1)", AUTHOR_COLUMNS);
        let authors: Vec<Author> = sqlx::query_as(&sql)
            .bind(keys)
            .fetch_all(&self.pool)
            .await
            .map_err(Arc::new)?;

        Ok(authors.into_iter().map(|a| (a.id, a)).collect())
    }
}
