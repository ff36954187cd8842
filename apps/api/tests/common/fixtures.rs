//! Test fixtures for API integration tests
//!
//! Provides reusable test configuration and data builders.

#![allow(dead_code)]

use sqlx::PgPool;
use uuid::Uuid;

use libris_api::graphql::{build_schema, LibrisSchema};
use libris_api::services::{AuthConfig, AuthService};

/// JWT secret for testing (must be at least 32 characters)
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-integration-tests-minimum-32-chars";

/// Bootstrap password seeded into accounts created during tests
pub const TEST_BOOTSTRAP_PASSWORD: &str = "secret";

/// Create an AuthService with the test configuration
pub fn test_auth_service() -> AuthService {
    AuthService::new(AuthConfig::new(
        TEST_JWT_SECRET.to_string(),
        TEST_BOOTSTRAP_PASSWORD.to_string(),
    ))
}

/// Build a schema against the given pool with the test auth service
pub fn test_schema(pool: PgPool) -> LibrisSchema {
    build_schema(pool, test_auth_service())
}

/// Generate a unique name so tests can run repeatedly against a persistent
/// test database (records are never deleted)
pub fn unique_name(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}
