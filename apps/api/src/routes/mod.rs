//! HTTP route handlers for the Libris API
//!
//! The GraphQL endpoint is wired directly in `main.rs`; this module holds
//! the remaining REST surface:
//! - Health check and status endpoints

pub mod health;

pub use health::{health_router, HealthState};
