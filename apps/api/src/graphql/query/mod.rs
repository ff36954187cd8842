//! GraphQL queries for Libris
//!
//! This module contains all query resolvers, organized by domain.

mod catalog;
mod user;

pub use catalog::CatalogQuery;
pub use user::UserQuery;

use async_graphql::MergedObject;

/// Root query type combining all query domains
#[derive(MergedObject, Default)]
pub struct Query(CatalogQuery, UserQuery);
