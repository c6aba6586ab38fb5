/*
 * Responsibility
 * - Shared context bound to the Router (AppState)
 * - Everything a handler depends on is injected here; no global handles
 * - Clone is cheap (PgPool / Arc internally)
 */
use std::sync::Arc;

use sqlx::PgPool;

use crate::services::{auth::AuthService, id_codec::IdCodec};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub id_codec: IdCodec,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(db: PgPool, id_codec: IdCodec, auth: Arc<AuthService>) -> Self {
        Self { db, id_codec, auth }
    }
}
