/*
 * Responsibility
 * - Auth request/response DTOs
 * - validate() does shape checks only; credential checks live in handlers
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub profile_image_url: Option<String>,
    pub bio: Option<String>,
    // Grants the admin role when it matches ADMIN_ACCESS_TOKEN
    pub admin_access_token: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err("a valid email is required");
        }
        if self.password.trim().is_empty() {
            return Err("password is required");
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.email.trim().is_empty() || self.password.trim().is_empty() {
            return Err("email and password are required");
        }
        Ok(())
    }
}

/// Profile + freshly signed access token (register/login response).
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_image_url: Option<String>,
    pub bio: String,
    pub role: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub profile_image_url: Option<String>,
    pub bio: String,
    pub role: String,
}
