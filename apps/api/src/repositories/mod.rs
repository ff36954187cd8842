//! Database repository layer for Libris
//!
//! This module provides the data access layer, centralizing all database
//! operations into reusable repositories. The repositories are the only
//! owners of persisted state; resolvers never cache records between
//! requests, so every read reflects the store at call time.

pub mod author;
pub mod book;
pub mod user;
pub mod utils;

pub use author::AuthorRepository;
pub use book::BookRepository;
pub use user::UserRepository;
