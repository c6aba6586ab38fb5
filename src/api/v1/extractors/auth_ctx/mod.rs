/*
 * Responsibility
 * - Bundle core and types; control what handlers can see
 */
mod core;
mod types;

pub use self::core::AuthCtxExtractor;
pub use types::*;
