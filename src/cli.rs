use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::tag::{normalize_title, MAX_TITLE_LENGTH};
use crate::models::{Comment, Post, Tag, User};

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Database(sqlx::Error),
    UnknownUser(String),
    UnknownPost(String),
    NotStaff(String),
    InvalidTag(String),
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportError::Io(e) => write!(f, "cannot read fixture: {e}"),
            ImportError::Json(e) => write!(f, "invalid fixture: {e}"),
            ImportError::Database(e) => write!(f, "database error: {e}"),
            ImportError::UnknownUser(name) => write!(f, "user '{name}' not found"),
            ImportError::UnknownPost(slug) => write!(f, "post with slug '{slug}' not found"),
            ImportError::NotStaff(name) => write!(f, "user '{name}' is not staff and cannot author posts"),
            ImportError::InvalidTag(title) => {
                write!(f, "tag '{title}' must be 1 to {MAX_TITLE_LENGTH} characters")
            }
        }
    }
}

impl std::error::Error for ImportError {}

impl From<std::io::Error> for ImportError {
    fn from(e: std::io::Error) -> Self {
        ImportError::Io(e)
    }
}

impl From<serde_json::Error> for ImportError {
    fn from(e: serde_json::Error) -> Self {
        ImportError::Json(e)
    }
}

impl From<sqlx::Error> for ImportError {
    fn from(e: sqlx::Error) -> Self {
        ImportError::Database(e)
    }
}

#[derive(Debug, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub users: Vec<FixtureUser>,
    #[serde(default)]
    pub posts: Vec<FixturePost>,
    #[serde(default)]
    pub comments: Vec<FixtureComment>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureUser {
    pub username: String,
    #[serde(default)]
    pub is_staff: bool,
}

#[derive(Debug, Deserialize)]
pub struct FixturePost {
    pub title: String,
    pub text: String,
    pub slug: String,
    pub image: Option<String>,
    pub published_at: DateTime<Utc>,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub likes: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FixtureComment {
    pub post_slug: String,
    pub author: String,
    pub text: String,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub users: usize,
    pub posts: usize,
    pub comments: usize,
}

/// Load a JSON fixture file and import it. Nothing is written unless the
/// whole file imports cleanly.
pub async fn import_fixture(pool: &SqlitePool, file_path: &Path) -> Result<ImportSummary, ImportError> {
    let content = fs::read_to_string(file_path)?;
    let fixture: Fixture = serde_json::from_str(&content)?;
    import(pool, fixture).await
}

pub async fn import(pool: &SqlitePool, fixture: Fixture) -> Result<ImportSummary, ImportError> {
    let mut summary = ImportSummary::default();
    let mut tx = pool.begin().await?;

    // Existing users are reused, so fixtures can be imported incrementally.
    for user in fixture.users {
        if User::find_by_username(&mut *tx, user.username.trim()).await?.is_none() {
            User::new(user.username, user.is_staff).insert(&mut *tx).await?;
            summary.users += 1;
        }
    }

    for entry in fixture.posts {
        let author = require_user(&mut *tx, &entry.author).await?;
        if !author.is_staff {
            return Err(ImportError::NotStaff(author.username));
        }

        let post = Post::new(
            author.id,
            entry.title,
            entry.text,
            entry.slug,
            entry.image.filter(|s| !s.trim().is_empty()),
            entry.published_at,
        );
        post.insert(&mut *tx).await?;

        for title in &entry.tags {
            let normalized = normalize_title(title);
            if normalized.is_empty() || normalized.chars().count() > MAX_TITLE_LENGTH {
                return Err(ImportError::InvalidTag(title.clone()));
            }
            let tag = Tag::get_or_create(&mut *tx, &normalized).await?;
            Post::add_tag(&mut *tx, &post.id, &tag.id).await?;
        }

        for username in &entry.likes {
            let user = require_user(&mut *tx, username).await?;
            Post::add_like(&mut *tx, &post.id, &user.id).await?;
        }

        tracing::debug!(slug = %post.slug, "imported post");
        summary.posts += 1;
    }

    // Resolved the same way the detail page resolves a slug, so a comment
    // always lands on the post that page shows.
    for entry in fixture.comments {
        let post_id = latest_post_id(&mut *tx, &entry.post_slug)
            .await?
            .ok_or_else(|| ImportError::UnknownPost(entry.post_slug.clone()))?;
        let author = require_user(&mut *tx, &entry.author).await?;

        Comment::new(post_id, author.id, entry.text, entry.published_at)
            .insert(&mut *tx)
            .await?;
        summary.comments += 1;
    }

    tx.commit().await?;
    tracing::info!(
        users = summary.users,
        posts = summary.posts,
        comments = summary.comments,
        "fixture imported"
    );
    Ok(summary)
}

async fn require_user(conn: &mut SqliteConnection, username: &str) -> Result<User, ImportError> {
    User::find_by_username(&mut *conn, username.trim())
        .await?
        .ok_or_else(|| ImportError::UnknownUser(username.to_string()))
}

async fn latest_post_id(conn: &mut SqliteConnection, slug: &str) -> Result<Option<String>, sqlx::Error> {
    let row: Option<(String,)> =
        sqlx::query_as("SELECT id FROM posts WHERE slug = ? ORDER BY published_at DESC, id LIMIT 1")
            .bind(slug)
            .fetch_optional(&mut *conn)
            .await?;
    Ok(row.map(|(id,)| id))
}

pub async fn create_user(pool: &SqlitePool, username: &str, is_staff: bool) -> Result<User, sqlx::Error> {
    let user = User::new(username.to_string(), is_staff);
    user.insert(pool).await?;

    println!("Created user:");
    println!("  ID: {}", user.id);
    println!("  Username: {}", user.username);
    println!("  Staff: {}", user.is_staff);

    Ok(user)
}
