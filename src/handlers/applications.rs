use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;

use crate::{
    error::AppError,
    extract::Json,
    models::{
        application::{Application, ApplicationStatus, NewApplication},
        clamp_paging, default_limit, default_page, Pagination,
    },
    state::AppState,
};

const APPLICATION_COLUMNS: &str = "id, nome_completo, email, telefone, data_nascimento, genero, \
     endereco, cidade, provincia, curso, universidade, ano_academico, media_atual, \
     situacao_financeira, renda_familiar, motivacao, objetivos, experiencia_academica, \
     atividades_extracurriculares, referencias, status, data_submissao, data_atualizacao";

pub async fn create_application(
    State(state): State<AppState>,
    Json(payload): Json<NewApplication>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM applications WHERE email = ?")
        .bind(&payload.email)
        .fetch_optional(&state.pool)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "An application with this email already exists".to_string(),
        ));
    }

    let result = sqlx::query(
        "INSERT INTO applications (
            nome_completo, email, telefone, data_nascimento, genero, endereco, cidade, provincia,
            curso, universidade, ano_academico, media_atual, situacao_financeira, renda_familiar,
            motivacao, objetivos, experiencia_academica, atividades_extracurriculares, referencias
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&payload.nome_completo)
    .bind(&payload.email)
    .bind(&payload.telefone)
    .bind(payload.data_nascimento)
    .bind(payload.genero)
    .bind(&payload.endereco)
    .bind(&payload.cidade)
    .bind(&payload.provincia)
    .bind(&payload.curso)
    .bind(&payload.universidade)
    .bind(&payload.ano_academico)
    .bind(payload.media_atual)
    .bind(&payload.situacao_financeira)
    .bind(payload.renda_familiar)
    .bind(&payload.motivacao)
    .bind(&payload.objetivos)
    .bind(&payload.experiencia_academica)
    .bind(&payload.atividades_extracurriculares)
    .bind(&payload.referencias)
    .execute(&state.pool)
    .await
    .map_err(|err| match &err {
        // The pre-check above races with concurrent submissions; the UNIQUE
        // constraint is the authority.
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(
            "An application with this email already exists".to_string(),
        ),
        _ => AppError::from(err),
    })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Application submitted successfully",
            "applicationId": result.last_insert_rowid()
        })),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ApplicationListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub status: Option<ApplicationStatus>,
    pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationListResponse {
    pub applications: Vec<Application>,
    pub pagination: Pagination,
}

pub async fn list_applications(
    State(state): State<AppState>,
    Query(params): Query<ApplicationListQuery>,
) -> Result<Json<ApplicationListResponse>, AppError> {
    let (page, limit) = clamp_paging(params.page, params.limit);
    let offset = (page - 1) * limit;

    let mut conditions: Vec<&str> = Vec::new();
    if params.status.is_some() {
        conditions.push("status = ?");
    }
    if params.search.is_some() {
        conditions.push("(nome_completo LIKE ? OR email LIKE ? OR curso LIKE ? OR universidade LIKE ?)");
    }
    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let list_sql = format!(
        "SELECT {APPLICATION_COLUMNS} FROM applications{where_clause} \
         ORDER BY data_submissao DESC LIMIT ? OFFSET ?"
    );
    let count_sql = format!("SELECT COUNT(*) FROM applications{where_clause}");
    let search_term = params.search.as_ref().map(|s| format!("%{s}%"));

    let mut list_query = sqlx::query_as::<_, Application>(&list_sql);
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    if let Some(status) = params.status {
        list_query = list_query.bind(status);
        count_query = count_query.bind(status);
    }
    if let Some(term) = &search_term {
        for _ in 0..4 {
            list_query = list_query.bind(term);
            count_query = count_query.bind(term);
        }
    }
    list_query = list_query.bind(limit).bind(offset);

    let applications = list_query.fetch_all(&state.pool).await?;
    let total = count_query.fetch_one(&state.pool).await?;

    Ok(Json(ApplicationListResponse {
        applications,
        pagination: Pagination::new(page, limit, total),
    }))
}

pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Application>, AppError> {
    let sql = format!("SELECT {APPLICATION_COLUMNS} FROM applications WHERE id = ?");
    let application = sqlx::query_as::<_, Application>(&sql)
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    Ok(Json(application))
}

pub async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let status = payload
        .get("status")
        .and_then(Value::as_str)
        .and_then(ApplicationStatus::parse)
        .ok_or_else(|| AppError::BadRequest("Invalid status".to_string()))?;

    let result = sqlx::query(
        "UPDATE applications SET status = ?, data_atualizacao = CURRENT_TIMESTAMP WHERE id = ?",
    )
    .bind(status)
    .bind(id)
    .execute(&state.pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Application not found".to_string()));
    }

    Ok(Json(json!({ "message": "Status updated successfully" })))
}

pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let result = sqlx::query("DELETE FROM applications WHERE id = ?")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Application not found".to_string()));
    }

    Ok(Json(json!({ "message": "Application deleted successfully" })))
}

/// Aggregate counts used by the review screen.
#[derive(Debug, Serialize, FromRow)]
pub struct ApplicationOverview {
    pub total: i64,
    pub pendentes: i64,
    pub aprovados: i64,
    pub rejeitados: i64,
    pub hoje: i64,
    pub esta_semana: i64,
}

pub async fn stats_overview(
    State(state): State<AppState>,
) -> Result<Json<ApplicationOverview>, AppError> {
    let stats = sqlx::query_as::<_, ApplicationOverview>(
        "SELECT
            COUNT(*) as total,
            COALESCE(SUM(CASE WHEN status = 'pendente' THEN 1 ELSE 0 END), 0) as pendentes,
            COALESCE(SUM(CASE WHEN status = 'aprovado' THEN 1 ELSE 0 END), 0) as aprovados,
            COALESCE(SUM(CASE WHEN status = 'rejeitado' THEN 1 ELSE 0 END), 0) as rejeitados,
            COALESCE(SUM(CASE WHEN DATE(data_submissao) = DATE('now') THEN 1 ELSE 0 END), 0) as hoje,
            COALESCE(SUM(CASE WHEN strftime('%Y-%W', data_submissao) = strftime('%Y-%W', 'now') \
                THEN 1 ELSE 0 END), 0) as esta_semana
         FROM applications",
    )
    .fetch_one(&state.pool)
    .await?;

    Ok(Json(stats))
}
