use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

/// A post row annotated with its author's name and related-row counts.
#[derive(Debug, Clone, FromRow)]
pub struct PostWithCounts {
    pub id: String,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub image: String,
    pub published_at: String,
    pub author_id: String,
    pub author: String,
    pub likes_count: i64,
    pub comments_count: i64,
}

// Counts are independent sub-selects: joining both likes and comments in one
// GROUP BY would multiply them.
const ANNOTATED_POSTS: &str = r#"
    SELECT p.id, p.title, p.text, p.slug, p.image, p.published_at, p.author_id,
           u.username AS author,
           (SELECT COUNT(*) FROM post_likes pl WHERE pl.post_id = p.id) AS likes_count,
           (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comments_count
    FROM posts p
    JOIN users u ON u.id = p.author_id
    WHERE 1 = 1"#;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum PostOrder {
    #[default]
    Freshest,
    Oldest,
    MostLiked,
}

/// Composable post listing.
///
/// ```ignore
/// let top = PostQuery::new().popular().limit(5).fetch(&db).await?;
/// let archive = PostQuery::new().year(2023).fetch(&db).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PostQuery {
    year: Option<i32>,
    tag_id: Option<String>,
    slug: Option<String>,
    order: PostOrder,
    limit: Option<i64>,
}

impl PostQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only posts published during `year`, oldest first.
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self.order = PostOrder::Oldest;
        self
    }

    pub fn tagged(mut self, tag_id: impl Into<String>) -> Self {
        self.tag_id = Some(tag_id.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Most liked first; equally liked posts keep freshest-first order.
    pub fn popular(mut self) -> Self {
        self.order = PostOrder::MostLiked;
        self
    }

    pub fn fresh(mut self) -> Self {
        self.order = PostOrder::Freshest;
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    fn build(&self) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new(ANNOTATED_POSTS);

        if let Some(year) = self.year {
            qb.push(" AND strftime('%Y', p.published_at) = ")
                .push_bind(format!("{year:04}"));
        }
        if let Some(tag_id) = &self.tag_id {
            qb.push(" AND p.id IN (SELECT post_id FROM post_tags WHERE tag_id = ")
                .push_bind(tag_id.clone())
                .push(")");
        }
        if let Some(slug) = &self.slug {
            qb.push(" AND p.slug = ").push_bind(slug.clone());
        }

        qb.push(match self.order {
            PostOrder::Freshest => " ORDER BY p.published_at DESC, p.id",
            PostOrder::Oldest => " ORDER BY p.published_at ASC, p.id",
            PostOrder::MostLiked => " ORDER BY likes_count DESC, p.published_at DESC, p.id",
        });

        if let Some(limit) = self.limit {
            qb.push(" LIMIT ").push_bind(limit);
        }
        qb
    }

    pub async fn fetch(self, db: &SqlitePool) -> Result<Vec<PostWithCounts>, sqlx::Error> {
        let mut qb = self.build();
        qb.build_query_as::<PostWithCounts>().fetch_all(db).await
    }

    pub async fn fetch_optional(self, db: &SqlitePool) -> Result<Option<PostWithCounts>, sqlx::Error> {
        let mut qb = self.limit(1).build();
        qb.build_query_as::<PostWithCounts>()
            .fetch_optional(db)
            .await
    }
}

/// Slugs are not unique; the most recently published post wins.
pub async fn post_by_slug(db: &SqlitePool, slug: &str) -> Result<Option<PostWithCounts>, sqlx::Error> {
    PostQuery::new().slug(slug).fresh().fetch_optional(db).await
}
