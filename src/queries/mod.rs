//! Reusable read queries. Each helper is a single filter, group-count or
//! batched join; handlers compose them instead of issuing per-row lookups.

pub mod comments;
pub mod posts;
pub mod tags;

pub use comments::{comments_for_post, CommentWithAuthor};
pub use posts::{post_by_slug, PostQuery, PostWithCounts};
pub use tags::{popular_tags, tag_by_title, tags_for_post, tags_for_posts, TagWithCount};
