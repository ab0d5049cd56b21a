use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::{json, Value};
use sqlx::FromRow;

use crate::{
    error::AppError,
    extract::Json,
    models::{
        admin_user::{
            AdminUser, AdminUserRow, CreateAdminUser, UpdatePasswordRequest, UpdateProfileRequest,
        },
        application::ApplicationStatus,
    },
    state::AppState,
    utils::password::{hash_password, verify_password},
};

pub async fn get_users(State(state): State<AppState>) -> Result<Json<Vec<AdminUserRow>>, AppError> {
    let users = sqlx::query_as::<_, AdminUserRow>(
        "SELECT id, username, role, created_at FROM admin_users ORDER BY created_at DESC",
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateAdminUser>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM admin_users WHERE username = ?")
        .bind(&payload.username)
        .fetch_optional(&state.pool)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("Username already exists".to_string()));
    }

    let password_hash = hash_password(&payload.password)?;
    let result =
        sqlx::query("INSERT INTO admin_users (username, password_hash, role) VALUES (?, ?, ?)")
            .bind(&payload.username)
            .bind(&password_hash)
            .bind(&payload.role)
            .execute(&state.pool)
            .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Admin user created successfully",
            "userId": result.last_insert_rowid()
        })),
    ))
}

pub async fn update_user_password(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdatePasswordRequest>,
) -> Result<Json<Value>, AppError> {
    if payload.password.chars().count() < 6 {
        return Err(AppError::BadRequest(
            "Password must have at least 6 characters".to_string(),
        ));
    }

    let password_hash = hash_password(&payload.password)?;
    let result = sqlx::query("UPDATE admin_users SET password_hash = ? WHERE id = ?")
        .bind(&password_hash)
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(Json(json!({ "message": "Password updated successfully" })))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(requester): Extension<AdminUser>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    if requester.id == id {
        return Err(AppError::BadRequest(
            "Cannot delete your own account".to_string(),
        ));
    }

    let result = sqlx::query("DELETE FROM admin_users WHERE id = ?")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(Json(json!({ "message": "User deleted successfully" })))
}

#[derive(Debug, Serialize, FromRow)]
pub struct ApplicationStats {
    pub total_applications: i64,
    pub pending_applications: i64,
    pub approved_applications: i64,
    pub rejected_applications: i64,
    pub applications_today: i64,
    pub applications_this_week: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct ScholarshipStats {
    pub total_scholarships: i64,
    pub active_scholarships: i64,
    pub inactive_scholarships: i64,
    pub total_available_spots: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct RecentApplication {
    pub id: i64,
    pub nome_completo: String,
    pub email: String,
    pub curso: String,
    pub universidade: String,
    pub status: ApplicationStatus,
    pub data_submissao: chrono::NaiveDateTime,
}

#[derive(Debug, Serialize, FromRow)]
pub struct CourseCount {
    pub curso: String,
    pub count: i64,
}

#[derive(Debug, Serialize, FromRow)]
pub struct UniversityCount {
    pub universidade: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub application_stats: ApplicationStats,
    pub scholarship_stats: ScholarshipStats,
    pub recent_applications: Vec<RecentApplication>,
    pub applications_by_course: Vec<CourseCount>,
    pub applications_by_university: Vec<UniversityCount>,
}

pub async fn dashboard(State(state): State<AppState>) -> Result<Json<DashboardResponse>, AppError> {
    let application_stats = sqlx::query_as::<_, ApplicationStats>(
        "SELECT
            COUNT(*) as total_applications,
            COALESCE(SUM(CASE WHEN status = 'pendente' THEN 1 ELSE 0 END), 0) as pending_applications,
            COALESCE(SUM(CASE WHEN status = 'aprovado' THEN 1 ELSE 0 END), 0) as approved_applications,
            COALESCE(SUM(CASE WHEN status = 'rejeitado' THEN 1 ELSE 0 END), 0) as rejected_applications,
            COALESCE(SUM(CASE WHEN DATE(data_submissao) = DATE('now') THEN 1 ELSE 0 END), 0) \
                as applications_today,
            COALESCE(SUM(CASE WHEN strftime('%Y-%W', data_submissao) = strftime('%Y-%W', 'now') \
                THEN 1 ELSE 0 END), 0) as applications_this_week
         FROM applications",
    )
    .fetch_one(&state.pool)
    .await?;

    let scholarship_stats = sqlx::query_as::<_, ScholarshipStats>(
        "SELECT
            COUNT(*) as total_scholarships,
            COALESCE(SUM(CASE WHEN status = 'ativo' THEN 1 ELSE 0 END), 0) as active_scholarships,
            COALESCE(SUM(CASE WHEN status = 'inativo' THEN 1 ELSE 0 END), 0) as inactive_scholarships,
            COALESCE(SUM(vagas_disponiveis), 0) as total_available_spots
         FROM scholarships",
    )
    .fetch_one(&state.pool)
    .await?;

    let recent_applications = sqlx::query_as::<_, RecentApplication>(
        "SELECT id, nome_completo, email, curso, universidade, status, data_submissao
         FROM applications ORDER BY data_submissao DESC LIMIT 5",
    )
    .fetch_all(&state.pool)
    .await?;

    let applications_by_course = sqlx::query_as::<_, CourseCount>(
        "SELECT curso, COUNT(*) as count FROM applications \
         GROUP BY curso ORDER BY count DESC LIMIT 5",
    )
    .fetch_all(&state.pool)
    .await?;

    let applications_by_university = sqlx::query_as::<_, UniversityCount>(
        "SELECT universidade, COUNT(*) as count FROM applications \
         GROUP BY universidade ORDER BY count DESC LIMIT 5",
    )
    .fetch_all(&state.pool)
    .await?;

    Ok(Json(DashboardResponse {
        application_stats,
        scholarship_stats,
        recent_applications,
        applications_by_course,
        applications_by_university,
    }))
}

pub async fn get_profile(
    Extension(user): Extension<AdminUser>,
) -> Result<Json<AdminUserRow>, AppError> {
    Ok(Json(AdminUserRow {
        id: user.id,
        username: user.username,
        role: user.role,
        created_at: user.created_at,
    }))
}

/// Updates the caller's own credentials. Password and username changes are
/// applied inside one transaction so a failed username change never leaves a
/// half-updated profile.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AdminUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let mut tx = state.pool.begin().await?;

    if let Some(new_password) = payload.new_password.as_deref() {
        let current = payload.current_password.as_deref().ok_or_else(|| {
            AppError::BadRequest("Current password is required to change the password".to_string())
        })?;
        if new_password.chars().count() < 6 {
            return Err(AppError::BadRequest(
                "New password must have at least 6 characters".to_string(),
            ));
        }
        if !verify_password(current, &user.password_hash)? {
            return Err(AppError::BadRequest(
                "Current password is incorrect".to_string(),
            ));
        }

        let password_hash = hash_password(new_password)?;
        sqlx::query("UPDATE admin_users SET password_hash = ? WHERE id = ?")
            .bind(&password_hash)
            .bind(user.id)
            .execute(&mut *tx)
            .await?;
    }

    if let Some(username) = payload.username.as_deref() {
        if username != user.username {
            let existing: Option<i64> =
                sqlx::query_scalar("SELECT id FROM admin_users WHERE username = ? AND id != ?")
                    .bind(username)
                    .bind(user.id)
                    .fetch_optional(&mut *tx)
                    .await?;
            if existing.is_some() {
                return Err(AppError::Conflict("Username already exists".to_string()));
            }

            sqlx::query("UPDATE admin_users SET username = ? WHERE id = ?")
                .bind(username)
                .bind(user.id)
                .execute(&mut *tx)
                .await?;
        }
    }

    tx.commit().await?;

    Ok(Json(json!({ "message": "Profile updated successfully" })))
}
