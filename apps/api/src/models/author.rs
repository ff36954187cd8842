//! Author model for Libris

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Author record from the authors table.
///
/// The number of books referencing an author is never stored here; it is
/// computed from the books table on every read.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Author {
    /// Unique author identifier
    pub id: Uuid,

    /// Author name (unique)
    pub name: String,

    /// Birth year, when known
    pub born: Option<i32>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_serialization() {
        let author = Author {
            id: Uuid::new_v4(),
            name: "Ursula K. Le Guin".to_string(),
            born: Some(1929),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&author).expect("serialization should succeed");
        assert!(json.contains("Ursula K. Le Guin"));
        assert!(json.contains("1929"));
    }
}
