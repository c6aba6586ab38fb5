/*
 * Responsibility
 * - Comments request/response DTOs
 * - A comment node always serializes `replies` as an array, even when
 *   empty; consumers rely on its presence
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::v1::dto::posts::AuthorResponse;

#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
    // Public id of the comment being replied to; absent for top-level
    pub parent_comment_id: Option<String>,
}

impl AddCommentRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.content.trim().is_empty() {
            return Err("content is required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: String,      // encoded
    pub post_id: String, // encoded
    pub author: AuthorResponse,
    pub content: String,
    pub parent_comment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub replies: Vec<CommentResponse>,
}
