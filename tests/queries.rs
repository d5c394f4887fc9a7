mod common;

use blog::queries::{self, PostQuery};
use common::TestApp;

#[tokio::test]
async fn counts_match_related_rows() {
    let app = TestApp::new().await;
    let author = app.create_user("editor", true).await;
    let a = app.create_user("a", false).await;
    let b = app.create_user("b", false).await;

    let busy = app.create_post(&author, "Busy", "busy", "2024-01-01T10:00:00Z").await;
    let idle = app.create_post(&author, "Idle", "idle", "2024-01-02T10:00:00Z").await;

    app.like(&busy, &a).await;
    app.like(&busy, &b).await;
    app.comment(&busy, &a, "x", "2024-01-03T10:00:00Z").await;
    app.comment(&busy, &a, "y", "2024-01-04T10:00:00Z").await;
    app.comment(&busy, &b, "z", "2024-01-05T10:00:00Z").await;

    let posts = PostQuery::new().fetch(&app.db).await.unwrap();
    let busy_row = posts.iter().find(|p| p.id == busy).unwrap();
    let idle_row = posts.iter().find(|p| p.id == idle).unwrap();

    assert_eq!(busy_row.likes_count, 2);
    assert_eq!(busy_row.comments_count, 3);
    assert_eq!(busy_row.author, "editor");
    assert_eq!(idle_row.likes_count, 0);
    assert_eq!(idle_row.comments_count, 0);
}

#[tokio::test]
async fn prefetch_groups_tags_by_post() {
    let app = TestApp::new().await;
    let author = app.create_user("editor", true).await;
    let first = app.create_post(&author, "First", "first", "2024-01-01T10:00:00Z").await;
    let second = app.create_post(&author, "Second", "second", "2024-01-02T10:00:00Z").await;
    let bare = app.create_post(&author, "Bare", "bare", "2024-01-03T10:00:00Z").await;

    app.tag_post(&first, "zeta").await;
    app.tag_post(&first, "beta").await;
    app.tag_post(&second, "beta").await;

    let ids = vec![first.clone(), second.clone(), bare.clone()];
    let tags = queries::tags_for_posts(&app.db, &ids).await.unwrap();

    let first_titles: Vec<&str> = tags[&first].iter().map(|t| t.title.as_str()).collect();
    assert_eq!(first_titles, vec!["beta", "zeta"]);
    assert_eq!(tags[&first][0].posts_count, 2);
    assert_eq!(tags[&second].len(), 1);
    assert!(!tags.contains_key(&bare));

    assert!(queries::tags_for_posts(&app.db, &[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn popular_tags_by_usage_then_title() {
    let app = TestApp::new().await;
    let author = app.create_user("editor", true).await;
    let p1 = app.create_post(&author, "P1", "p1", "2024-01-01T10:00:00Z").await;
    let p2 = app.create_post(&author, "P2", "p2", "2024-01-02T10:00:00Z").await;

    app.tag_post(&p1, "common").await;
    app.tag_post(&p2, "common").await;
    app.tag_post(&p1, "beta").await;
    app.tag_post(&p2, "alpha").await;

    let tags = queries::popular_tags(&app.db, 5).await.unwrap();
    let titles: Vec<&str> = tags.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["common", "alpha", "beta"]);

    let limited = queries::popular_tags(&app.db, 1).await.unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn tag_filter_and_year_compose() {
    let app = TestApp::new().await;
    let author = app.create_user("editor", true).await;
    let old = app.create_post(&author, "Old", "old", "2022-05-01T10:00:00Z").await;
    let new = app.create_post(&author, "New", "new", "2023-05-01T10:00:00Z").await;
    app.create_post(&author, "Untagged", "untagged", "2023-06-01T10:00:00Z").await;
    let tag = app.tag_post(&old, "travel").await;
    app.tag_post(&new, "travel").await;

    let posts = PostQuery::new()
        .tagged(tag.id.as_str())
        .year(2023)
        .fetch(&app.db)
        .await
        .unwrap();
    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["New"]);
}

#[tokio::test]
async fn comments_for_post_oldest_first() {
    let app = TestApp::new().await;
    let author = app.create_user("editor", true).await;
    let reader = app.create_user("reader", false).await;
    let post = app.create_post(&author, "P", "p", "2024-01-01T10:00:00Z").await;
    app.comment(&post, &reader, "later", "2024-01-05T10:00:00Z").await;
    app.comment(&post, &reader, "earlier", "2024-01-02T10:00:00Z").await;

    let comments = queries::comments_for_post(&app.db, &post).await.unwrap();
    let texts: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["earlier", "later"]);
    assert_eq!(comments[0].author, "reader");
}

#[tokio::test]
async fn missing_lookups_return_none() {
    let app = TestApp::new().await;
    assert!(queries::post_by_slug(&app.db, "nope").await.unwrap().is_none());
    assert!(queries::tag_by_title(&app.db, "nope").await.unwrap().is_none());
}

#[tokio::test]
async fn prefetch_handles_more_ids_than_bind_limit() {
    let app = TestApp::new().await;
    let author = app.create_user("editor", true).await;
    let first = app.create_post(&author, "First", "first", "2024-01-01T10:00:00Z").await;
    let last = app.create_post(&author, "Last", "last", "2024-01-02T10:00:00Z").await;
    app.tag_post(&first, "alpha").await;
    app.tag_post(&last, "omega").await;

    let mut ids = vec![first.clone()];
    ids.extend((0..40_000).map(|i| format!("missing-{i}")));
    ids.push(last.clone());

    let tags = queries::tags_for_posts(&app.db, &ids).await.unwrap();
    assert_eq!(tags.len(), 2);
    assert_eq!(tags[&first][0].title, "alpha");
    assert_eq!(tags[&last][0].title, "omega");
}
