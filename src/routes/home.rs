use askama::Template;
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use super::{summarize, Sidebar, TOP_AMOUNT};
use crate::error::AppError;
use crate::queries::PostQuery;
use crate::views::PostSummary;
use crate::AppState;

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    page_posts: Vec<PostSummary>,
    sidebar: Sidebar,
    static_hash: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let sidebar = Sidebar::load(&state).await?;

    let fresh = PostQuery::new().fresh().limit(TOP_AMOUNT).fetch(&state.db).await?;
    let page_posts = summarize(&state, fresh).await?;

    let template = IndexTemplate {
        page_posts,
        sidebar,
        static_hash: crate::STATIC_HASH,
    };
    Ok(Html(template.render()?))
}
