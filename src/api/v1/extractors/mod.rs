/*
 * Responsibility
 * - Extractors shared by the v1 handlers
 */
pub mod auth_ctx;
pub mod public_id;

pub use auth_ctx::*;
pub use public_id::*;
