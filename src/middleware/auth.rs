//! Two-stage auth gate: bearer-token authentication, then role
//! authorization. Each stage exits the pipeline with a terminal JSON error;
//! on success the authenticated principal rides along in request extensions.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::{
    error::AppError, models::admin_user::AdminUser, state::AppState, utils::jwt::verify_token,
};

/// Token authentication only: any account with a valid token passes.
pub async fn auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate_request(request.headers(), &state).await?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Token authentication plus the admin-role check for admin-only routes.
pub async fn auth_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = authenticate_request(request.headers(), &state).await?;
    if !user.is_admin() {
        return Err(AppError::Forbidden("Admin access required".to_string()));
    }
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn parse_bearer_token(header: &str) -> Option<&str> {
    if let Some(rest) = header.strip_prefix("Bearer ") {
        return Some(rest);
    }
    if let Some(space_idx) = header.find(' ') {
        let (scheme, rest) = header.split_at(space_idx);
        if scheme.eq_ignore_ascii_case("bearer") {
            return Some(rest.trim_start());
        }
    }
    None
}

/// Shared authentication routine. The header checks run before any database
/// access; the account lookup re-confirms the principal still exists after
/// the token was issued.
async fn authenticate_request(
    headers: &HeaderMap,
    state: &AppState,
) -> Result<AdminUser, AppError> {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_bearer_token)
        .ok_or_else(|| AppError::Unauthorized("Token not provided".to_string()))?;

    let claims = verify_token(token, &state.config.jwt_secret)
        .map_err(|_| AppError::Unauthorized("Invalid token".to_string()))?;

    let user = sqlx::query_as::<_, AdminUser>(
        "SELECT id, username, password_hash, role, created_at FROM admin_users WHERE id = ?",
    )
    .bind(claims.sub)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

    Ok(user)
}
