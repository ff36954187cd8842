//! User and authentication GraphQL types

use async_graphql::{Object, SimpleObject};
use uuid::Uuid;

use crate::models::User as DbUser;

/// User account information exposed via GraphQL
pub struct User {
    inner: DbUser,
}

impl User {
    /// Create a new GraphQL User from a database User
    pub fn new(user: DbUser) -> Self {
        Self { inner: user }
    }
}

impl From<DbUser> for User {
    fn from(user: DbUser) -> Self {
        Self::new(user)
    }
}

#[Object]
impl User {
    /// Unique user identifier
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Username
    async fn username(&self) -> &str {
        &self.inner.username
    }

    /// The user's favorite genre
    async fn favorite_genre(&self) -> &str {
        &self.inner.favorite_genre
    }
}

/// Signed credential returned by a successful login
#[derive(Debug, Clone, SimpleObject)]
pub struct Token {
    /// The signed token value
    pub value: String,
}
