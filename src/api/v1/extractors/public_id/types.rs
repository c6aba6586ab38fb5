/*
 * Responsibility
 * - Resource-specific public id aliases (the part that grows mechanically)
 */
use super::core::PublicId;

// posts
pub enum PostTag {}
pub type PublicPostId = PublicId<PostTag>;

// comments
pub enum CommentTag {}
pub type PublicCommentId = PublicId<CommentTag>;
