//! Book model for Libris

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Book record from the books table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Book {
    /// Unique book identifier
    pub id: Uuid,

    /// Book title (unique)
    pub title: String,

    /// Publication year
    pub published: i32,

    /// Referenced author; the foreign key guarantees it resolves
    pub author_id: Uuid,

    /// Genre tags, in insertion order
    pub genres: Vec<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_serialization() {
        let book = Book {
            id: Uuid::new_v4(),
            title: "A Wizard of Earthsea".to_string(),
            published: 1968,
            author_id: Uuid::new_v4(),
            genres: vec!["fantasy".to_string(), "classic".to_string()],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&book).expect("serialization should succeed");
        assert!(json.contains("A Wizard of Earthsea"));
        assert!(json.contains("fantasy"));
    }
}
