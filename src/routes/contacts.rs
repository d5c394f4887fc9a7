use askama::Template;
use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::error::AppError;
use crate::AppState;

#[derive(Template)]
#[template(path = "contacts.html")]
struct ContactsTemplate {
    static_hash: &'static str,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/contacts", get(contacts))
}

async fn contacts() -> Result<impl IntoResponse, AppError> {
    let template = ContactsTemplate {
        static_hash: crate::STATIC_HASH,
    };
    Ok(Html(template.render()?))
}
