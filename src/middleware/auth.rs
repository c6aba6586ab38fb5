/*
 * Responsibility
 * - Bearer token verification (header extraction → JWT verify → reject)
 * - On success, put the authenticated principal (AuthCtx) into request
 *   extensions; handlers receive it through the AuthCtx extractor
 * - Authorization (role/ownership checks) stays in the handlers
 */
use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::v1::extractors::{AuthCtx, Role};
use crate::error::AppError;
use crate::state::AppState;

pub async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;

    let claims = match state.auth.verify(token) {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(error = ?err, "access token verification failed");
            return Err(AppError::Unauthorized);
        }
    };

    // Subject is the internal user id (UUID)
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AppError::Unauthorized)?;

    let auth_ctx = AuthCtx::new(user_id, Role::parse(&claims.role));

    // middleware → extractor hand-off
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}
