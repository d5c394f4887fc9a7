use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteExecutor};
use uuid::Uuid;

use super::timestamp;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: String,
    pub post_id: String,
    pub author_id: String,
    pub text: String,
    pub published_at: String,
}

impl Comment {
    pub fn new(post_id: String, author_id: String, text: String, published_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            post_id,
            author_id,
            text,
            published_at: timestamp(published_at),
        }
    }

    pub async fn insert<'e, E>(&self, db: E) -> Result<(), sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query(
            "INSERT INTO comments (id, post_id, author_id, text, published_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&self.id)
        .bind(&self.post_id)
        .bind(&self.author_id)
        .bind(&self.text)
        .bind(&self.published_at)
        .execute(db)
        .await?;
        Ok(())
    }
}
