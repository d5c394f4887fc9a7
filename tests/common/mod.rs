#![allow(dead_code)]

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use blog::config::Config;
use blog::models::{Comment, Post, Tag, User};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub struct TestApp {
    pub router: Router,
    pub db: SqlitePool,
}

impl TestApp {
    pub async fn new() -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("Failed to create in-memory SQLite pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let router = blog::build_app(pool.clone(), &Config::default());

        Self { router, db: pool }
    }

    /// Send a request through the app and return the response.
    pub async fn request(&self, req: Request<Body>) -> Response {
        tower::ServiceExt::oneshot(self.router.clone(), req)
            .await
            .unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.request(req).await
    }

    /// Create a user and return its id.
    pub async fn create_user(&self, username: &str, is_staff: bool) -> String {
        let user = User::new(username.to_string(), is_staff);
        user.insert(&self.db).await.expect("Failed to create test user");
        user.id
    }

    /// Create a post and return its id. `published_at` is RFC 3339.
    pub async fn create_post(&self, author_id: &str, title: &str, slug: &str, published_at: &str) -> String {
        self.create_post_with(author_id, title, slug, published_at, "Body text.", None)
            .await
    }

    pub async fn create_post_with(
        &self,
        author_id: &str,
        title: &str,
        slug: &str,
        published_at: &str,
        text: &str,
        image: Option<&str>,
    ) -> String {
        let post = Post::new(
            author_id.to_string(),
            title.to_string(),
            text.to_string(),
            slug.to_string(),
            image.map(str::to_string),
            at(published_at),
        );
        post.insert(&self.db).await.expect("Failed to create test post");
        post.id
    }

    pub async fn tag_post(&self, post_id: &str, title: &str) -> Tag {
        let tag = Tag::get_or_create(&self.db, title).await.expect("Failed to create tag");
        Post::add_tag(&self.db, post_id, &tag.id).await.expect("Failed to tag post");
        tag
    }

    pub async fn like(&self, post_id: &str, user_id: &str) {
        Post::add_like(&self.db, post_id, user_id).await.expect("Failed to like post");
    }

    pub async fn comment(&self, post_id: &str, author_id: &str, text: &str, published_at: &str) {
        Comment::new(post_id.to_string(), author_id.to_string(), text.to_string(), at(published_at))
            .insert(&self.db)
            .await
            .expect("Failed to create comment");
    }
}

pub fn at(rfc3339: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(rfc3339)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

/// Read the full response body as a String.
pub async fn body_string(resp: Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// The part of `html` from `marker` up to the closing `</section>`.
pub fn section<'a>(html: &'a str, marker: &str) -> &'a str {
    let start = html.find(marker).expect("section marker present");
    let rest = &html[start..];
    let end = rest.find("</section>").unwrap_or(rest.len());
    &rest[..end]
}

/// Assert that `needles` appear in `haystack` in the given order.
pub fn assert_in_order(haystack: &str, needles: &[&str]) {
    let positions: Vec<usize> = needles
        .iter()
        .map(|n| haystack.find(n).unwrap_or_else(|| panic!("{n} not found")))
        .collect();
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "expected order {needles:?}, positions {positions:?}"
    );
}
