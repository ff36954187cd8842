//! DataLoader implementations for GraphQL
//!
//! This module provides DataLoader implementations to solve N+1 query
//! problems in GraphQL relationship resolvers. Each loader batches multiple
//! requests into a single database query.

mod author;

pub use author::AuthorLoader;
