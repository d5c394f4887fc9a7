use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use super::Sidebar;
use crate::error::AppError;
use crate::queries;
use crate::views::PostDetail;
use crate::AppState;

#[derive(Template)]
#[template(path = "post_detail.html")]
struct PostDetailTemplate {
    post: PostDetail,
    sidebar: Sidebar,
    static_hash: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/post/{slug}", get(post_detail))
}

async fn post_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let Some(post) = queries::post_by_slug(&state.db, &slug).await? else {
        return Err(AppError::NotFound);
    };

    let comments = queries::comments_for_post(&state.db, &post.id).await?;
    let tags = queries::tags_for_post(&state.db, &post.id).await?;
    let sidebar = Sidebar::load(&state).await?;

    let template = PostDetailTemplate {
        post: PostDetail::new(post, comments, tags, &state.media_url),
        sidebar,
        static_hash: crate::STATIC_HASH,
    };
    Ok(Html(template.render()?))
}
