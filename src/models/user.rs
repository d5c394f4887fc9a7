use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqliteExecutor};
use uuid::Uuid;

use super::timestamp;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: String,
    pub username: String,
    pub is_staff: bool,
    pub created_at: String,
}

impl User {
    pub fn new(username: String, is_staff: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username: username.trim().to_string(),
            is_staff,
            created_at: timestamp(Utc::now()),
        }
    }

    pub async fn insert<'e, E>(&self, db: E) -> Result<(), sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query("INSERT INTO users (id, username, is_staff, created_at) VALUES (?, ?, ?, ?)")
            .bind(&self.id)
            .bind(&self.username)
            .bind(self.is_staff)
            .bind(&self.created_at)
            .execute(db)
            .await?;
        Ok(())
    }

    pub async fn find_by_username<'e, E>(db: E, username: &str) -> Result<Option<User>, sqlx::Error>
    where
        E: SqliteExecutor<'e>,
    {
        sqlx::query_as("SELECT * FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(db)
            .await
    }
}
