//! Account mutations for the Libris GraphQL API
//!
//! This module provides mutations for account handling:
//! - createUser: Create a new account (no authentication required)
//! - login: Verify a credential and return a signed token

use async_graphql::{Context, ErrorExtensions, Object, Result};

use crate::error::ApiError;
use crate::graphql::types::{Token, User};
use crate::repositories::UserRepository;
use crate::services::AuthService;

/// Account mutations
#[derive(Default)]
pub struct AuthMutation;

#[Object]
impl AuthMutation {
    /// Create a new user account
    ///
    /// The account is seeded with the configured initial password
    /// credential, hashed per-user.
    ///
    /// # Errors
    /// - `VALIDATION_ERROR` when the username is empty
    /// - `CONFLICT` when the username is already taken
    async fn create_user(
        &self,
        ctx: &Context<'_>,
        username: String,
        favorite_genre: String,
    ) -> Result<User> {
        if username.trim().is_empty() {
            return Err(
                ApiError::ValidationError("username must not be empty".to_string()).extend(),
            );
        }

        let auth_service = ctx.data::<AuthService>()?;
        let user_repo = ctx.data::<UserRepository>()?;

        let password_hash = auth_service
            .initial_password_hash()
            .map_err(|e| e.extend())?;

        let user = user_repo
            .create(&username, &favorite_genre, &password_hash)
            .await
            .map_err(|e| ApiError::store("user", username.as_str(), e).extend())?;

        tracing::info!(user_id = %user.id, username = %user.username, "User created");

        Ok(User::from(user))
    }

    /// Verify a username/password pair and return a signed token
    ///
    /// # Errors
    /// - `INVALID_CREDENTIALS` when the user is unknown or the password
    ///   does not match the stored credential
    async fn login(&self, ctx: &Context<'_>, username: String, password: String) -> Result<Token> {
        let auth_service = ctx.data::<AuthService>()?;
        let user_repo = ctx.data::<UserRepository>()?;

        let user = user_repo.find_by_username(&username).await?;

        // Verify a hash in both cases so the response time does not reveal
        // whether the username exists.
        let password_valid = match &user {
            Some(u) => auth_service
                .verify_password(&password, &u.password_hash)
                .map_err(|e| e.extend())?,
            None => {
                auth_service.dummy_verify(&password);
                false
            }
        };

        let user = match (user, password_valid) {
            (Some(u), true) => u,
            _ => {
                tracing::warn!(username = %username, "Login failed");
                return Err(ApiError::InvalidCredentials.extend());
            }
        };

        let token = auth_service.sign_token(&user).map_err(|e| e.extend())?;

        tracing::info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(Token { value: token })
    }
}
