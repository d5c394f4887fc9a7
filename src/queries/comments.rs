use sqlx::{FromRow, SqlitePool};

#[derive(Debug, Clone, FromRow)]
pub struct CommentWithAuthor {
    pub id: String,
    pub text: String,
    pub published_at: String,
    pub author: String,
}

/// Oldest first, author names joined in.
pub async fn comments_for_post(db: &SqlitePool, post_id: &str) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT c.id, c.text, c.published_at, u.username AS author
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.post_id = ?
        ORDER BY c.published_at ASC, c.id
        "#,
    )
    .bind(post_id)
    .fetch_all(db)
    .await
}
