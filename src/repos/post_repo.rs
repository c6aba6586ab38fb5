/*
 * Responsibility
 * - SQLx operations for the posts table
 * - Every read joins the author (display name + image only get exposed)
 * - View/like counters are relative increments executed by the store,
 *   never read-modify-write in the application
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    #[sqlx(rename = "postId")]
    pub post_id: i64,

    pub title: String,
    pub slug: String,
    pub content: String,

    #[sqlx(rename = "coverImageUrl")]
    pub cover_image_url: Option<String>,

    pub tags: Vec<String>,

    #[sqlx(rename = "authorId")]
    pub author_id: Uuid,

    #[sqlx(rename = "isDraft")]
    pub is_draft: bool,

    pub views: i64,
    pub likes: i64,

    #[sqlx(rename = "generatedByAI")]
    pub generated_by_ai: bool,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[sqlx(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,

    // populated from users
    #[sqlx(rename = "authorName")]
    pub author_name: String,

    #[sqlx(rename = "authorImageUrl")]
    pub author_image_url: Option<String>,
}

/// Listing filter over the draft flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStatus {
    Published,
    Draft,
    All,
}

impl PostStatus {
    /// The `isDraft` value the filter matches; `None` means no filter.
    pub fn is_draft(self) -> Option<bool> {
        match self {
            PostStatus::Published => Some(false),
            PostStatus::Draft => Some(true),
            PostStatus::All => None,
        }
    }
}

/// Category counts over the entire posts table, independent of any filter
/// applied to the listing itself.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct PostCounts {
    pub all: i64,
    pub published: i64,
    pub draft: i64,
}

impl PostCounts {
    /// The match count of the given filter, read off the full counts.
    pub fn for_status(&self, status: PostStatus) -> i64 {
        match status {
            PostStatus::Published => self.published,
            PostStatus::Draft => self.draft,
            PostStatus::All => self.all,
        }
    }
}

const POST_SELECT: &str = r#"
    SELECT
        p."postId", p."title", p."slug", p."content", p."coverImageUrl",
        p."tags", p."authorId", p."isDraft", p."views", p."likes",
        p."generatedByAI", p."createdAt", p."updatedAt",
        u."name" AS "authorName", u."profileImageUrl" AS "authorImageUrl"
    FROM posts p
    JOIN users u ON u."userId" = p."authorId"
"#;

pub async fn list_page(
    db: &PgPool,
    status: PostStatus,
    limit: i64,
    offset: i64,
) -> Result<Vec<PostRow>, RepoError> {
    let sql = format!(
        r#"
        {POST_SELECT}
        WHERE ($1::boolean IS NULL OR p."isDraft" = $1)
        ORDER BY p."updatedAt" DESC
        LIMIT $2 OFFSET $3
        "#
    );

    let rows = sqlx::query_as::<_, PostRow>(&sql)
        .bind(status.is_draft())
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

    Ok(rows)
}

/// Counts for all/published/draft over the whole table, one round trip.
pub async fn counts(db: &PgPool) -> Result<PostCounts, RepoError> {
    let counts = sqlx::query_as::<_, PostCounts>(
        r#"
        SELECT
            COUNT(*)                                AS "all",
            COUNT(*) FILTER (WHERE NOT "isDraft")   AS "published",
            COUNT(*) FILTER (WHERE "isDraft")       AS "draft"
        FROM posts
        "#,
    )
    .fetch_one(db)
    .await?;

    Ok(counts)
}

pub async fn get(db: &PgPool, post_id: i64) -> Result<Option<PostRow>, RepoError> {
    let sql = format!(
        r#"
        {POST_SELECT}
        WHERE p."postId" = $1
        "#
    );

    let row = sqlx::query_as::<_, PostRow>(&sql)
        .bind(post_id)
        .fetch_optional(db)
        .await?;

    Ok(row)
}

pub async fn get_by_slug(db: &PgPool, slug: &str) -> Result<Option<PostRow>, RepoError> {
    let sql = format!(
        r#"
        {POST_SELECT}
        WHERE p."slug" = $1
        "#
    );

    let row = sqlx::query_as::<_, PostRow>(&sql)
        .bind(slug)
        .fetch_optional(db)
        .await?;

    Ok(row)
}

/// Posts carrying the tag; drafts are excluded on this read path.
pub async fn list_by_tag(db: &PgPool, tag: &str) -> Result<Vec<PostRow>, RepoError> {
    let sql = format!(
        r#"
        {POST_SELECT}
        WHERE $1 = ANY(p."tags") AND NOT p."isDraft"
        ORDER BY p."updatedAt" DESC
        "#
    );

    let rows = sqlx::query_as::<_, PostRow>(&sql)
        .bind(tag)
        .fetch_all(db)
        .await?;

    Ok(rows)
}

/// The query is matched literally, so `%`/`_`/`\` in it must not act as
/// LIKE metacharacters.
fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Case-insensitive substring match over title/content; drafts excluded.
pub async fn search(db: &PgPool, query: &str) -> Result<Vec<PostRow>, RepoError> {
    let sql = format!(
        r#"
        {POST_SELECT}
        WHERE NOT p."isDraft"
          AND (p."title" ILIKE '%' || $1 || '%' OR p."content" ILIKE '%' || $1 || '%')
        ORDER BY p."updatedAt" DESC
        "#
    );

    let rows = sqlx::query_as::<_, PostRow>(&sql)
        .bind(escape_like(query))
        .fetch_all(db)
        .await?;

    Ok(rows)
}

/// Top 5 by views, ties broken by likes; drafts excluded.
pub async fn trending(db: &PgPool) -> Result<Vec<PostRow>, RepoError> {
    let sql = format!(
        r#"
        {POST_SELECT}
        WHERE NOT p."isDraft"
        ORDER BY p."views" DESC, p."likes" DESC
        LIMIT 5
        "#
    );

    let rows = sqlx::query_as::<_, PostRow>(&sql).fetch_all(db).await?;

    Ok(rows)
}

#[allow(clippy::too_many_arguments)]
pub async fn create(
    db: &PgPool,
    title: &str,
    slug: &str,
    content: &str,
    cover_image_url: Option<&str>,
    tags: &[String],
    author_id: Uuid,
    is_draft: bool,
    generated_by_ai: bool,
) -> Result<PostRow, RepoError> {
    // CTE so the returned row carries the joined author columns
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        WITH p AS (
            INSERT INTO posts
                ("title", "slug", "content", "coverImageUrl", "tags",
                 "authorId", "isDraft", "generatedByAI")
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
        )
        SELECT
            p."postId", p."title", p."slug", p."content", p."coverImageUrl",
            p."tags", p."authorId", p."isDraft", p."views", p."likes",
            p."generatedByAI", p."createdAt", p."updatedAt",
            u."name" AS "authorName", u."profileImageUrl" AS "authorImageUrl"
        FROM p
        JOIN users u ON u."userId" = p."authorId"
        "#,
    )
    .bind(title)
    .bind(slug)
    .bind(content)
    .bind(cover_image_url)
    .bind(tags)
    .bind(author_id)
    .bind(is_draft)
    .bind(generated_by_ai)
    .fetch_one(db)
    .await?;

    Ok(row)
}

#[allow(clippy::too_many_arguments)]
pub async fn update(
    db: &PgPool,
    post_id: i64,
    title: Option<&str>,
    slug: Option<&str>,
    content: Option<&str>,
    cover_image_url: Option<&str>,
    tags: Option<Vec<String>>,
    is_draft: Option<bool>,
    generated_by_ai: Option<bool>,
) -> Result<Option<PostRow>, RepoError> {
    let row = sqlx::query_as::<_, PostRow>(
        r#"
        WITH p AS (
            UPDATE posts
            SET
                "title"         = COALESCE($2, "title"),
                "slug"          = COALESCE($3, "slug"),
                "content"       = COALESCE($4, "content"),
                "coverImageUrl" = COALESCE($5, "coverImageUrl"),
                "tags"          = COALESCE($6, "tags"),
                "isDraft"       = COALESCE($7, "isDraft"),
                "generatedByAI" = COALESCE($8, "generatedByAI"),
                "updatedAt"     = now()
            WHERE "postId" = $1
            RETURNING *
        )
        SELECT
            p."postId", p."title", p."slug", p."content", p."coverImageUrl",
            p."tags", p."authorId", p."isDraft", p."views", p."likes",
            p."generatedByAI", p."createdAt", p."updatedAt",
            u."name" AS "authorName", u."profileImageUrl" AS "authorImageUrl"
        FROM p
        JOIN users u ON u."userId" = p."authorId"
        "#,
    )
    .bind(post_id)
    .bind(title)
    .bind(slug)
    .bind(content)
    .bind(cover_image_url)
    .bind(tags)
    .bind(is_draft)
    .bind(generated_by_ai)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, post_id: i64) -> Result<bool, RepoError> {
    let result = sqlx::query(
        r#"
        DELETE FROM posts
        WHERE "postId" = $1
        "#,
    )
    .bind(post_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Atomic relative increment; concurrent callers never lose updates.
pub async fn increment_views(db: &PgPool, post_id: i64) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        UPDATE posts
        SET "views" = "views" + 1
        WHERE "postId" = $1
        "#,
    )
    .bind(post_id)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn increment_likes(db: &PgPool, post_id: i64) -> Result<(), RepoError> {
    sqlx::query(
        r#"
        UPDATE posts
        SET "likes" = "likes" + 1
        WHERE "postId" = $1
        "#,
    )
    .bind(post_id)
    .execute(db)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_filter_semantics() {
        assert_eq!(PostStatus::Published.is_draft(), Some(false));
        assert_eq!(PostStatus::Draft.is_draft(), Some(true));
        assert_eq!(PostStatus::All.is_draft(), None);
    }

    #[test]
    fn search_input_is_matched_literally() {
        assert_eq!(escape_like("rust"), "rust");
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
        // escape the escape char first or the others double up
        assert_eq!(escape_like("a\\%b"), "a\\\\\\%b");
    }

    #[test]
    fn counts_are_independent_of_the_active_filter() {
        // 3 drafts + 7 published: a draft-filtered listing still reads the
        // full-collection numbers off the same counts row.
        let counts = PostCounts {
            all: 10,
            published: 7,
            draft: 3,
        };

        assert_eq!(counts.for_status(PostStatus::Draft), 3);
        assert_eq!(counts.for_status(PostStatus::Published), 7);
        assert_eq!(counts.for_status(PostStatus::All), 10);
    }
}
