use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use super::tags::PostsListTemplate;
use super::{summarize, Sidebar};
use crate::error::AppError;
use crate::queries::PostQuery;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/archive/{year}", get(year_archive))
}

async fn year_archive(
    State(state): State<AppState>,
    Path(year): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let year: i32 = year.parse().map_err(|_| AppError::NotFound)?;
    let posts = PostQuery::new().year(year).fetch(&state.db).await?;
    let posts = summarize(&state, posts).await?;
    let sidebar = Sidebar::load(&state).await?;

    let template = PostsListTemplate {
        heading: format!("Posts from {year}"),
        tag: None,
        posts,
        sidebar,
        static_hash: crate::STATIC_HASH,
    };
    Ok(Html(template.render()?))
}
