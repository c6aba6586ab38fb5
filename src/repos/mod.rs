/*
 * Responsibility
 * - SQLx access to the document-ish tables (users/posts/comments)
 * - Each repo takes the PgPool explicitly; no global client handle
 */
pub mod comment_repo;
pub mod error;
pub mod post_repo;
pub mod user_repo;
