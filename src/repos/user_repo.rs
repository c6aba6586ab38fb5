/*
 * Responsibility
 * - SQLx operations for the users table
 * - Rows carry the stored password hash; DTO mapping decides what leaves
 *   the process
 */
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::repos::error::RepoError;

#[derive(Debug, FromRow)]
pub struct UserRow {
    #[sqlx(rename = "userId")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    #[sqlx(rename = "profileImageUrl")]
    pub profile_image_url: Option<String>,
    pub bio: String,
    pub role: String,
}

pub async fn create(
    db: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
    profile_image_url: Option<&str>,
    bio: &str,
    role: &str,
) -> Result<UserRow, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users ("name", "email", "password", "profileImageUrl", "bio", "role")
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING "userId", "name", "email", "password", "profileImageUrl", "bio", "role"
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(profile_image_url)
    .bind(bio)
    .bind(role)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn get(db: &PgPool, user_id: Uuid) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT "userId", "name", "email", "password", "profileImageUrl", "bio", "role"
        FROM users
        WHERE "userId" = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn get_by_email(db: &PgPool, email: &str) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT "userId", "name", "email", "password", "profileImageUrl", "bio", "role"
        FROM users
        WHERE "email" = $1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await?;

    Ok(row)
}
