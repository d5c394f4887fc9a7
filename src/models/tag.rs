use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteExecutor};
use uuid::Uuid;

pub const MAX_TITLE_LENGTH: usize = 20;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Tag {
    pub id: String,
    pub title: String,
}

/// Tag titles are stored lowercase; every write path goes through this.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

impl Tag {
    pub fn new(title: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: normalize_title(title),
        }
    }

    /// Fetch the tag with this (normalized) title, creating it if missing.
    pub async fn get_or_create<'e, E>(db: E, title: &str) -> Result<Tag, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        let tag = Tag::new(title);
        sqlx::query_as(
            r#"
            INSERT INTO tags (id, title) VALUES (?, ?)
            ON CONFLICT(title) DO UPDATE SET title = excluded.title
            RETURNING id, title
            "#,
        )
        .bind(&tag.id)
        .bind(&tag.title)
        .fetch_one(db)
        .await
    }
}
