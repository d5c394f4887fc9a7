use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteExecutor};
use uuid::Uuid;

use super::timestamp;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub text: String,
    pub slug: String,
    /// Path under the media root or an absolute URL. Empty when the post has
    /// no picture.
    pub image: String,
    pub published_at: String,
    pub author_id: String,
}

impl Post {
    pub fn new(
        author_id: String,
        title: String,
        text: String,
        slug: String,
        image: Option<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            text,
            slug,
            image: image.unwrap_or_default(),
            published_at: timestamp(published_at),
            author_id,
        }
    }

    pub async fn insert<'e, E>(&self, db: E) -> Result<(), sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query(
            r#"
            INSERT INTO posts (id, title, text, slug, image, published_at, author_id)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&self.id)
        .bind(&self.title)
        .bind(&self.text)
        .bind(&self.slug)
        .bind(&self.image)
        .bind(&self.published_at)
        .bind(&self.author_id)
        .execute(db)
        .await?;
        Ok(())
    }

    pub async fn add_tag<'e, E>(db: E, post_id: &str, tag_id: &str) -> Result<(), sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query("INSERT OR IGNORE INTO post_tags (post_id, tag_id) VALUES (?, ?)")
            .bind(post_id)
            .bind(tag_id)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn add_like<'e, E>(db: E, post_id: &str, user_id: &str) -> Result<(), sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query("INSERT OR IGNORE INTO post_likes (post_id, user_id) VALUES (?, ?)")
            .bind(post_id)
            .bind(user_id)
            .execute(db)
            .await?;
        Ok(())
    }
}
