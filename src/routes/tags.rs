use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use super::{summarize, Sidebar};
use crate::error::AppError;
use crate::models::tag::normalize_title;
use crate::queries::{self, PostQuery};
use crate::views::PostSummary;
use crate::AppState;

/// Posts shown on a tag page.
const TAG_PAGE_POSTS: i64 = 20;

#[derive(Template)]
#[template(path = "posts_list.html")]
pub(crate) struct PostsListTemplate {
    pub heading: String,
    pub tag: Option<String>,
    pub posts: Vec<PostSummary>,
    pub sidebar: Sidebar,
    pub static_hash: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/tag/{title}", get(tag_filter))
}

async fn tag_filter(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let Some(tag) = queries::tag_by_title(&state.db, &normalize_title(&title)).await? else {
        return Err(AppError::NotFound);
    };

    let related = PostQuery::new()
        .tagged(tag.id.as_str())
        .fresh()
        .limit(TAG_PAGE_POSTS)
        .fetch(&state.db)
        .await?;
    let posts = summarize(&state, related).await?;
    let sidebar = Sidebar::load(&state).await?;

    let template = PostsListTemplate {
        heading: format!("Posts tagged #{}", tag.title),
        tag: Some(tag.title),
        posts,
        sidebar,
        static_hash: crate::STATIC_HASH,
    };
    Ok(Html(template.render()?))
}
