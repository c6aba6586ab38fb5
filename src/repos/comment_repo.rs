/*
 * Responsibility
 * - SQLx operations for the comments table
 * - Reads come back ordered by creation time ascending, which is the order
 *   the tree builder expects
 * - Delete cascades one level only (the comment + its direct children);
 *   grandchildren keep their dangling parent reference on purpose
 */
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    #[sqlx(rename = "commentId")]
    pub comment_id: i64,

    #[sqlx(rename = "postId")]
    pub post_id: i64,

    #[sqlx(rename = "authorId")]
    pub author_id: Uuid,

    pub content: String,

    #[sqlx(rename = "parentCommentId")]
    pub parent_comment_id: Option<i64>,

    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    // populated from users
    #[sqlx(rename = "authorName")]
    pub author_name: String,

    #[sqlx(rename = "authorImageUrl")]
    pub author_image_url: Option<String>,
}

const COMMENT_SELECT: &str = r#"
    SELECT
        c."commentId", c."postId", c."authorId", c."content",
        c."parentCommentId", c."createdAt",
        u."name" AS "authorName", u."profileImageUrl" AS "authorImageUrl"
    FROM comments c
    JOIN users u ON u."userId" = c."authorId"
"#;

pub async fn list_by_post(db: &PgPool, post_id: i64) -> Result<Vec<CommentRow>, RepoError> {
    let sql = format!(
        r#"
        {COMMENT_SELECT}
        WHERE c."postId" = $1
        ORDER BY c."createdAt" ASC
        "#
    );

    let rows = sqlx::query_as::<_, CommentRow>(&sql)
        .bind(post_id)
        .fetch_all(db)
        .await?;

    Ok(rows)
}

pub async fn list_all(db: &PgPool) -> Result<Vec<CommentRow>, RepoError> {
    let sql = format!(
        r#"
        {COMMENT_SELECT}
        ORDER BY c."createdAt" ASC
        "#
    );

    let rows = sqlx::query_as::<_, CommentRow>(&sql).fetch_all(db).await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, comment_id: i64) -> Result<Option<CommentRow>, RepoError> {
    let sql = format!(
        r#"
        {COMMENT_SELECT}
        WHERE c."commentId" = $1
        "#
    );

    let row = sqlx::query_as::<_, CommentRow>(&sql)
        .bind(comment_id)
        .fetch_optional(db)
        .await?;

    Ok(row)
}

pub async fn create(
    db: &PgPool,
    post_id: i64,
    author_id: Uuid,
    content: &str,
    parent_comment_id: Option<i64>,
) -> Result<CommentRow, RepoError> {
    // CTE so the returned row carries the joined author columns
    let row = sqlx::query_as::<_, CommentRow>(
        r#"
        WITH c AS (
            INSERT INTO comments ("postId", "authorId", "content", "parentCommentId")
            VALUES ($1, $2, $3, $4)
            RETURNING *
        )
        SELECT
            c."commentId", c."postId", c."authorId", c."content",
            c."parentCommentId", c."createdAt",
            u."name" AS "authorName", u."profileImageUrl" AS "authorImageUrl"
        FROM c
        JOIN users u ON u."userId" = c."authorId"
        "#,
    )
    .bind(post_id)
    .bind(author_id)
    .bind(content)
    .bind(parent_comment_id)
    .fetch_one(db)
    .await?;

    Ok(row)
}

/// Delete a comment and, one level only, its direct children.
///
/// Deeper descendants are left in place with a parent id that no longer
/// resolves; the tree builder promotes them to roots. Returns false when the
/// target comment does not exist.
pub async fn delete_with_children(db: &PgPool, comment_id: i64) -> Result<bool, RepoError> {
    let mut tx = db.begin().await?;

    let deleted = sqlx::query(
        r#"
        DELETE FROM comments
        WHERE "commentId" = $1
        "#,
    )
    .bind(comment_id)
    .execute(&mut *tx)
    .await?;

    if deleted.rows_affected() == 0 {
        return Ok(false);
    }

    sqlx::query(
        r#"
        DELETE FROM comments
        WHERE "parentCommentId" = $1
        "#,
    )
    .bind(comment_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(true)
}
