use axum::extract::{Extension, State};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    extract::Json,
    models::admin_user::{AdminUser, LoginRequest, LoginResponse, UserInfo, VerifyResponse},
    state::AppState,
    utils::{jwt::create_token, password::verify_password},
};

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = sqlx::query_as::<_, AdminUser>(
        "SELECT id, username, password_hash, role, created_at FROM admin_users WHERE username = ?",
    )
    .bind(&payload.username)
    .fetch_optional(&state.pool)
    .await?
    .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

    let matches = verify_password(&payload.password, &user.password_hash)?;
    if !matches {
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let token = create_token(
        &user,
        &state.config.jwt_secret,
        state.config.jwt_expiration_hours,
    )?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: UserInfo::from(&user),
    }))
}

/// The auth middleware has already verified the token and re-fetched the
/// account; this just echoes the principal back.
pub async fn verify(Extension(user): Extension<AdminUser>) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        user: UserInfo::from(&user),
    })
}

/// Tokens are stateless; logout exists so clients have an endpoint to call
/// when discarding theirs.
pub async fn logout() -> Json<Value> {
    Json(json!({ "message": "Logout successful" }))
}
