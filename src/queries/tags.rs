use std::collections::HashMap;

use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

/// A tag annotated with how many posts carry it.
#[derive(Debug, Clone, FromRow)]
pub struct TagWithCount {
    pub id: String,
    pub title: String,
    pub posts_count: i64,
}

#[derive(FromRow)]
struct PostTagRow {
    post_id: String,
    id: String,
    title: String,
    posts_count: i64,
}

pub async fn popular_tags(db: &SqlitePool, limit: i64) -> Result<Vec<TagWithCount>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT t.id, t.title, COUNT(pt.post_id) AS posts_count
        FROM tags t
        LEFT JOIN post_tags pt ON pt.tag_id = t.id
        GROUP BY t.id
        ORDER BY posts_count DESC, t.title ASC
        LIMIT ?
        "#,
    )
    .bind(limit)
    .fetch_all(db)
    .await
}

pub async fn tag_by_title(db: &SqlitePool, title: &str) -> Result<Option<TagWithCount>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT t.id, t.title, COUNT(pt.post_id) AS posts_count
        FROM tags t
        LEFT JOIN post_tags pt ON pt.tag_id = t.id
        WHERE t.title = ?
        GROUP BY t.id
        "#,
    )
    .bind(title)
    .fetch_optional(db)
    .await
}

/// Tags of one post, most used first.
pub async fn tags_for_post(db: &SqlitePool, post_id: &str) -> Result<Vec<TagWithCount>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT t.id, t.title,
               (SELECT COUNT(*) FROM post_tags x WHERE x.tag_id = t.id) AS posts_count
        FROM tags t
        JOIN post_tags pt ON pt.tag_id = t.id
        WHERE pt.post_id = ?
        ORDER BY posts_count DESC, t.title ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(db)
    .await
}

// Keeps each prefetch statement well under SQLite's bind-variable limit.
const PREFETCH_CHUNK: usize = 500;

/// Prefetch the tags of many posts, keyed by post id. One query per
/// [`PREFETCH_CHUNK`] ids. Each post's tags are ordered by title.
pub async fn tags_for_posts(
    db: &SqlitePool,
    post_ids: &[String],
) -> Result<HashMap<String, Vec<TagWithCount>>, sqlx::Error> {
    let mut grouped: HashMap<String, Vec<TagWithCount>> = HashMap::new();
    if post_ids.is_empty() {
        return Ok(grouped);
    }

    for chunk in post_ids.chunks(PREFETCH_CHUNK) {
        let mut qb: QueryBuilder<'_, Sqlite> = QueryBuilder::new(
            r#"
            SELECT pt.post_id, t.id, t.title,
                   (SELECT COUNT(*) FROM post_tags x WHERE x.tag_id = t.id) AS posts_count
            FROM post_tags pt
            JOIN tags t ON t.id = pt.tag_id
            WHERE pt.post_id IN ("#,
        );
        let mut ids = qb.separated(", ");
        for id in chunk {
            ids.push_bind(id.as_str());
        }
        qb.push(") ORDER BY t.title ASC");

        let rows: Vec<PostTagRow> = qb.build_query_as().fetch_all(db).await?;
        for row in rows {
            grouped.entry(row.post_id).or_default().push(TagWithCount {
                id: row.id,
                title: row.title,
                posts_count: row.posts_count,
            });
        }
    }
    Ok(grouped)
}
