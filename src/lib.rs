pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod queries;
pub mod routes;
pub mod views;

pub const STATIC_HASH: &str = env!("STATIC_HASH");

use axum::http::{header, HeaderValue};
use axum::{routing::get, Router};
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::{
    services::ServeDir,
    set_header::SetResponseHeaderLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub media_url: String,
}

async fn health() -> &'static str {
    "ok"
}

/// Build the full Axum application router.
///
/// Caller is responsible for running database migrations on `pool` beforehand.
pub fn build_app(pool: SqlitePool, config: &Config) -> Router {
    let state = AppState {
        db: pool,
        media_url: config.media_url.clone(),
    };

    Router::new()
        .route("/health", get(health))
        .merge(routes::home::router())
        .merge(routes::posts::router())
        .merge(routes::tags::router())
        .merge(routes::archive::router())
        .merge(routes::contacts::router())
        .nest_service(
            "/static",
            ServiceBuilder::new()
                .layer(SetResponseHeaderLayer::overriding(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("public, max-age=86400"),
                ))
                .service(ServeDir::new("static")),
        )
        .nest_service("/media", ServeDir::new(&config.media_root))
        .fallback(error::fallback)
        .layer(
            TraceLayer::new_for_http()
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
