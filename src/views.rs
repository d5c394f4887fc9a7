//! Plain structures handed to templates. Conversion only: truncation,
//! optional-field handling and timestamp formatting.

use chrono::DateTime;
use serde::Serialize;
use url::Url;

use crate::queries::{CommentWithAuthor, PostWithCounts, TagWithCount};

/// Maximum teaser length, in characters.
pub const TEASER_LENGTH: usize = 200;

#[derive(Debug, Clone, Serialize)]
pub struct TagSummary {
    pub title: String,
    pub posts_with_tag: i64,
}

impl From<TagWithCount> for TagSummary {
    fn from(tag: TagWithCount) -> Self {
        Self {
            title: tag.title,
            posts_with_tag: tag.posts_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub title: String,
    pub teaser_text: String,
    pub author: String,
    pub comments_amount: i64,
    pub likes_amount: i64,
    pub image_url: Option<String>,
    pub published_at: String,
    pub slug: String,
    pub tags: Vec<TagSummary>,
    pub first_tag_title: Option<String>,
}

impl PostSummary {
    pub fn new(post: PostWithCounts, tags: Vec<TagWithCount>, media_url: &str) -> Self {
        let tags: Vec<TagSummary> = tags.into_iter().map(TagSummary::from).collect();
        Self {
            teaser_text: teaser(&post.text),
            image_url: image_url(media_url, &post.image),
            published_at: display_timestamp(&post.published_at),
            first_tag_title: tags.first().map(|t| t.title.clone()),
            title: post.title,
            author: post.author,
            comments_amount: post.comments_count,
            likes_amount: post.likes_count,
            slug: post.slug,
            tags,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentView {
    pub text: String,
    pub published_at: String,
    pub author: String,
}

impl From<CommentWithAuthor> for CommentView {
    fn from(comment: CommentWithAuthor) -> Self {
        Self {
            published_at: display_timestamp(&comment.published_at),
            text: comment.text,
            author: comment.author,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub title: String,
    pub text: String,
    pub author: String,
    pub comments: Vec<CommentView>,
    pub likes_amount: i64,
    pub image_url: Option<String>,
    pub published_at: String,
    pub slug: String,
    pub tags: Vec<TagSummary>,
}

impl PostDetail {
    pub fn new(
        post: PostWithCounts,
        comments: Vec<CommentWithAuthor>,
        tags: Vec<TagWithCount>,
        media_url: &str,
    ) -> Self {
        Self {
            image_url: image_url(media_url, &post.image),
            published_at: display_timestamp(&post.published_at),
            title: post.title,
            text: post.text,
            author: post.author,
            comments: comments.into_iter().map(CommentView::from).collect(),
            likes_amount: post.likes_count,
            slug: post.slug,
            tags: tags.into_iter().map(TagSummary::from).collect(),
        }
    }
}

/// First [`TEASER_LENGTH`] characters of `text`.
pub fn teaser(text: &str) -> String {
    text.chars().take(TEASER_LENGTH).collect()
}

/// Public URL of a post image. Absolute URLs are kept as they are, anything
/// else is resolved under `media_url`.
pub fn image_url(media_url: &str, image: &str) -> Option<String> {
    let image = image.trim();
    if image.is_empty() {
        return None;
    }
    if Url::parse(image).is_ok() {
        return Some(image.to_string());
    }
    Some(format!(
        "{}/{}",
        media_url.trim_end_matches('/'),
        image.trim_start_matches('/')
    ))
}

pub fn display_timestamp(stored: &str) -> String {
    DateTime::parse_from_rfc3339(stored)
        .map(|at| at.format("%d %B %Y %H:%M").to_string())
        .unwrap_or_else(|_| stored.to_string())
}
