//! Request middleware for Libris
//!
//! Currently the per-request authentication context built from the
//! Authorization header.

pub mod auth;

pub use auth::{build_auth_context, extract_bearer_token, AuthContext};
