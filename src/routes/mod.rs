pub mod archive;
pub mod contacts;
pub mod home;
pub mod posts;
pub mod tags;

use crate::queries::{self, PostQuery, PostWithCounts};
use crate::views::{PostSummary, TagSummary};
use crate::AppState;

/// How many popular/fresh items a page block shows.
pub const TOP_AMOUNT: i64 = 5;

/// Most liked posts and most used tags, shown beside every page.
pub struct Sidebar {
    pub popular_posts: Vec<PostSummary>,
    pub popular_tags: Vec<TagSummary>,
}

impl Sidebar {
    pub async fn load(state: &AppState) -> Result<Self, sqlx::Error> {
        let popular = PostQuery::new().popular().limit(TOP_AMOUNT).fetch(&state.db).await?;
        let popular_posts = summarize(state, popular).await?;

        let popular_tags = queries::popular_tags(&state.db, TOP_AMOUNT)
            .await?
            .into_iter()
            .map(TagSummary::from)
            .collect();

        Ok(Self {
            popular_posts,
            popular_tags,
        })
    }
}

/// Serialize a page of posts, prefetching all their tags in one query.
pub async fn summarize(state: &AppState, posts: Vec<PostWithCounts>) -> Result<Vec<PostSummary>, sqlx::Error> {
    let ids: Vec<String> = posts.iter().map(|p| p.id.clone()).collect();
    let mut tags = queries::tags_for_posts(&state.db, &ids).await?;

    Ok(posts
        .into_iter()
        .map(|post| {
            let post_tags = tags.remove(&post.id).unwrap_or_default();
            PostSummary::new(post, post_tags, &state.media_url)
        })
        .collect())
}
