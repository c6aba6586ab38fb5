/*
 * Responsibility
 * - The "authenticated context" type handlers see
 * - The auth middleware verifies the token and stores this in request
 *   extensions; handlers only ever receive the typed context. Identity is
 *   an explicit input, never ambient request state
 */
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    /// Stored as a plain string in users.role and in the token claims;
    /// anything unknown degrades to Member.
    pub fn parse(s: &str) -> Self {
        match s {
            "admin" => Role::Admin,
            _ => Role::Member,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthCtx {
    pub fn new(user_id: Uuid, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
