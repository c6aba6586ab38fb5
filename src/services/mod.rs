/*
 * Responsibility
 * - Domain services shared by handlers (no HTTP types in here)
 */
pub mod auth;
pub mod comment_tree;
pub mod id_codec;
pub mod slug;
