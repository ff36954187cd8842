//! Service layer for Libris
//!
//! Services encapsulate logic that is not tied to a single resolver,
//! currently the token signing/verification and credential hashing.

pub mod auth;

pub use auth::{AuthConfig, AuthService};
