//! Shared constants for repositories

// ============================================================================
// SQL Column Constants
//
// These constants define the SELECT column lists for each entity type,
// reducing duplication and ensuring consistency across queries.
// ============================================================================

/// SQL columns for author queries
pub const AUTHOR_COLUMNS: &str = "id, name, born, created_at, updated_at";

/// SQL columns for book queries
pub const BOOK_COLUMNS: &str = "id, title, published, author_id, genres, created_at, updated_at";

/// Book columns qualified for queries that join against authors
pub const BOOK_COLUMNS_QUALIFIED: &str =
    "b.id, b.title, b.published, b.author_id, b.genres, b.created_at, b.updated_at";

/// SQL columns for user queries
pub const USER_COLUMNS: &str =
    "id, username, password_hash, favorite_genre, created_at, updated_at";
