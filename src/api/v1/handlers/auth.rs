/*
 * Responsibility
 * - /auth register/login/profile handlers
 * - DTO validation → user repo → token signing; role comes from the admin
 *   access token check at registration
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::auth::{AuthResponse, LoginRequest, ProfileResponse, RegisterRequest},
        extractors::AuthCtxExtractor,
    },
    error::AppError,
    repos::user_repo,
    state::AppState,
};

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    let email = req.email.trim().to_lowercase();

    if user_repo::get_by_email(&state.db, &email).await?.is_some() {
        return Err(AppError::bad_request(
            "USER_EXISTS",
            "user already exists, please login",
        ));
    }

    let password_hash = state.auth.hash_password(req.password.trim())?;
    let role = state.auth.register_role(req.admin_access_token.as_deref());

    let row = user_repo::create(
        &state.db,
        req.name.trim(),
        &email,
        &password_hash,
        req.profile_image_url.as_deref(),
        req.bio.as_deref().unwrap_or(""),
        role,
    )
    .await?;

    let token = state.auth.sign(row.id, &row.role)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            id: row.id,
            name: row.name,
            email: row.email,
            profile_image_url: row.profile_image_url,
            bio: row.bio,
            role: row.role,
            token,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    req.validate()
        .map_err(|msg| AppError::bad_request("INVALID_REQUEST", msg))?;

    let email = req.email.trim().to_lowercase();

    // Unknown user and wrong password are indistinguishable to the caller
    let row = user_repo::get_by_email(&state.db, &email)
        .await?
        .ok_or(AppError::Unauthorized)?;

    if !state.auth.verify_password(req.password.trim(), &row.password) {
        return Err(AppError::Unauthorized);
    }

    let token = state.auth.sign(row.id, &row.role)?;

    Ok(Json(AuthResponse {
        id: row.id,
        name: row.name,
        email: row.email,
        profile_image_url: row.profile_image_url,
        bio: row.bio,
        role: row.role,
        token,
    }))
}

pub async fn profile(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
) -> Result<Json<ProfileResponse>, AppError> {
    let row = user_repo::get(&state.db, ctx.user_id)
        .await?
        .ok_or(AppError::not_found("user"))?;

    Ok(Json(ProfileResponse {
        id: row.id,
        name: row.name,
        email: row.email,
        profile_image_url: row.profile_image_url,
        bio: row.bio,
        role: row.role,
    }))
}
