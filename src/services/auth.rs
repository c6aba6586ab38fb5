/*
 * Responsibility
 * - Access token issuing/verification (HS256 JWT, 7-day TTL by default)
 * - Password hashing/verification (argon2, PHC string format)
 * - Admin registration token check (register → role decision)
 */
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Internal user id (UUID)
    pub sub: String,
    pub role: String,
    pub iat: u64,
    pub exp: u64,
}

pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
    admin_access_token: Option<String>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl AuthService {
    pub fn new(secret: &str, ttl_seconds: u64, admin_access_token: Option<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl_seconds,
            admin_access_token,
        }
    }

    pub fn sign(&self, user_id: Uuid, role: &str) -> Result<String, AppError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = AccessClaims {
            sub: user_id.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| {
                error!(error = %e, "failed to sign access token");
                AppError::Internal
            },
        )
    }

    /// Verify signature + exp and decode the claims.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, jsonwebtoken::errors::Error> {
        let data = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// Role granted at registration: admin only when the configured admin
    /// access token is presented, member otherwise.
    pub fn register_role(&self, presented: Option<&str>) -> &'static str {
        match (self.admin_access_token.as_deref(), presented) {
            (Some(expected), Some(given)) if expected == given => "admin",
            _ => "member",
        }
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| {
                error!(error = %e, "failed to hash password");
                AppError::Internal
            })
    }

    pub fn verify_password(&self, password: &str, stored: &str) -> bool {
        PasswordHash::new(stored)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new("test-secret", 3600, Some("let-me-in".to_string()))
    }

    #[test]
    fn sign_verify_round_trip() {
        let svc = service();
        let user_id = Uuid::new_v4();

        let token = svc.sign(user_id, "admin").unwrap();
        let claims = svc.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let other = AuthService::new("other-secret", 3600, None);
        let token = other.sign(Uuid::new_v4(), "member").unwrap();

        assert!(service().verify(&token).is_err());
    }

    #[test]
    fn admin_token_grants_admin_role() {
        let svc = service();
        assert_eq!(svc.register_role(Some("let-me-in")), "admin");
        assert_eq!(svc.register_role(Some("wrong")), "member");
        assert_eq!(svc.register_role(None), "member");
    }

    #[test]
    fn no_admin_token_configured_never_grants_admin() {
        let svc = AuthService::new("s", 3600, None);
        assert_eq!(svc.register_role(Some("anything")), "member");
    }

    #[test]
    fn password_hash_verify() {
        let svc = service();
        let hash = svc.hash_password("hunter2").unwrap();

        assert!(svc.verify_password("hunter2", &hash));
        assert!(!svc.verify_password("hunter3", &hash));
        assert!(!svc.verify_password("hunter2", "not-a-phc-string"));
    }
}
