//! User queries for the Libris GraphQL API
//!
//! This module provides queries for user data:
//! - me: Get the currently authenticated user

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::graphql::types::User;
use crate::middleware::AuthContext;

/// User-related queries
#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Get the currently authenticated user
    ///
    /// # Errors
    /// - Returns `UNAUTHORIZED` when the request carried no credential
    async fn me(&self, ctx: &Context<'_>) -> Result<User> {
        let auth = ctx.data::<AuthContext>()?;
        let user = auth.require_user().map_err(|e| e.extend())?;
        Ok(User::from(user.clone()))
    }
}
