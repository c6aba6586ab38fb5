/*
 * Responsibility
 * - Posts request/response DTOs
 * - Public ids go out encoded; internal i64 never leaks
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_draft: bool,
    #[serde(default)]
    pub generated_by_ai: bool,
}

impl CreatePostRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("title is required");
        }
        if self.content.trim().is_empty() {
            return Err("content is required");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub cover_image_url: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_draft: Option<bool>,
    pub generated_by_ai: Option<bool>,
}

impl UpdatePostRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(title) = &self.title
            && title.trim().is_empty()
        {
            return Err("title cannot be empty");
        }
        if let Some(content) = &self.content
            && content.trim().is_empty()
        {
            return Err("content cannot be empty");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct ListPostsQuery {
    pub status: Option<String>,
    pub page: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Author display fields only; email/password never leave the process here.
#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: Uuid,
    pub name: String,
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: String, // encoded
    pub slug: String,
    pub title: String,
    pub content: String,
    pub cover_image_url: Option<String>,
    pub tags: Vec<String>,
    pub author: AuthorResponse,
    pub is_draft: bool,
    pub views: i64,
    pub likes: i64,
    pub generated_by_ai: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PostCountsResponse {
    pub all: i64,
    pub published: i64,
    pub draft: i64,
}

#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub page: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub counts: PostCountsResponse,
}
