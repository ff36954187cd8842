//! GraphQL schema and resolvers for Libris
//!
//! This module contains the async-graphql schema including:
//! - Query resolvers for counts, book and author listings, and the current user
//! - Mutation resolvers for catalog writes and account handling
//! - Type definitions for all GraphQL objects
//! - DataLoaders for batched relationship resolution

pub mod loaders;
pub mod mutation;
pub mod query;
pub mod schema;
pub mod types;

pub use schema::{build_schema, LibrisSchema, SchemaBuilder};
