//! Database models for Libris
//!
//! This module contains SQLx models for:
//! - Authors and their books
//! - User accounts and token claims

pub mod author;
pub mod book;
pub mod user;

pub use author::Author;
pub use book::Book;
pub use user::User;
