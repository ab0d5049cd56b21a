use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::AppError,
    extract::Json,
    models::{
        clamp_paging, default_limit, default_page,
        scholarship::{PublicScholarship, Scholarship, ScholarshipPayload, ScholarshipStatus},
        Pagination,
    },
    state::AppState,
};

const SCHOLARSHIP_COLUMNS: &str = "id, nome, descricao, valor, duracao_meses, requisitos, \
     data_inicio, data_fim, vagas_disponiveis, status, created_at";

const PUBLIC_COLUMNS: &str = "id, nome, descricao, valor, duracao_meses, requisitos, \
     data_inicio, data_fim, vagas_disponiveis";

/// Active, non-expired scholarships for the public site.
pub async fn list_public(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicScholarship>>, AppError> {
    let sql = format!(
        "SELECT {PUBLIC_COLUMNS} FROM scholarships \
         WHERE status = 'ativo' AND data_fim >= DATE('now') \
         ORDER BY data_inicio DESC"
    );
    let scholarships = sqlx::query_as::<_, PublicScholarship>(&sql)
        .fetch_all(&state.pool)
        .await?;

    Ok(Json(scholarships))
}

pub async fn get_public(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PublicScholarship>, AppError> {
    let sql = format!("SELECT {PUBLIC_COLUMNS} FROM scholarships WHERE id = ? AND status = 'ativo'");
    let scholarship = sqlx::query_as::<_, PublicScholarship>(&sql)
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Scholarship not found or inactive".to_string()))?;

    Ok(Json(scholarship))
}

#[derive(Debug, Deserialize)]
pub struct ScholarshipListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
    pub status: Option<ScholarshipStatus>,
}

#[derive(Debug, Serialize)]
pub struct ScholarshipListResponse {
    pub scholarships: Vec<Scholarship>,
    pub pagination: Pagination,
}

pub async fn list_scholarships(
    State(state): State<AppState>,
    Query(params): Query<ScholarshipListQuery>,
) -> Result<Json<ScholarshipListResponse>, AppError> {
    let (page, limit) = clamp_paging(params.page, params.limit);
    let offset = (page - 1) * limit;

    let where_clause = if params.status.is_some() {
        " WHERE status = ?"
    } else {
        ""
    };
    let list_sql = format!(
        "SELECT {SCHOLARSHIP_COLUMNS} FROM scholarships{where_clause} \
         ORDER BY created_at DESC LIMIT ? OFFSET ?"
    );
    let count_sql = format!("SELECT COUNT(*) FROM scholarships{where_clause}");

    let mut list_query = sqlx::query_as::<_, Scholarship>(&list_sql);
    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    if let Some(status) = params.status {
        list_query = list_query.bind(status);
        count_query = count_query.bind(status);
    }
    list_query = list_query.bind(limit).bind(offset);

    let scholarships = list_query.fetch_all(&state.pool).await?;
    let total = count_query.fetch_one(&state.pool).await?;

    Ok(Json(ScholarshipListResponse {
        scholarships,
        pagination: Pagination::new(page, limit, total),
    }))
}

pub async fn get_scholarship(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Scholarship>, AppError> {
    let sql = format!("SELECT {SCHOLARSHIP_COLUMNS} FROM scholarships WHERE id = ?");
    let scholarship = sqlx::query_as::<_, Scholarship>(&sql)
        .bind(id)
        .fetch_optional(&state.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Scholarship not found".to_string()))?;

    Ok(Json(scholarship))
}

pub async fn create_scholarship(
    State(state): State<AppState>,
    Json(payload): Json<ScholarshipPayload>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let result = sqlx::query(
        "INSERT INTO scholarships (
            nome, descricao, valor, duracao_meses, requisitos,
            data_inicio, data_fim, vagas_disponiveis, status
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&payload.nome)
    .bind(&payload.descricao)
    .bind(payload.valor)
    .bind(payload.duracao_meses)
    .bind(&payload.requisitos)
    .bind(payload.data_inicio)
    .bind(payload.data_fim)
    .bind(payload.vagas_disponiveis)
    .bind(payload.status)
    .execute(&state.pool)
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Scholarship created successfully",
            "scholarshipId": result.last_insert_rowid()
        })),
    ))
}

pub async fn update_scholarship(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ScholarshipPayload>,
) -> Result<Json<Value>, AppError> {
    let result = sqlx::query(
        "UPDATE scholarships SET
            nome = ?, descricao = ?, valor = ?, duracao_meses = ?, requisitos = ?,
            data_inicio = ?, data_fim = ?, vagas_disponiveis = ?, status = ?
         WHERE id = ?",
    )
    .bind(&payload.nome)
    .bind(&payload.descricao)
    .bind(payload.valor)
    .bind(payload.duracao_meses)
    .bind(&payload.requisitos)
    .bind(payload.data_inicio)
    .bind(payload.data_fim)
    .bind(payload.vagas_disponiveis)
    .bind(payload.status)
    .bind(id)
    .execute(&state.pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Scholarship not found".to_string()));
    }

    Ok(Json(json!({ "message": "Scholarship updated successfully" })))
}

pub async fn delete_scholarship(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let result = sqlx::query("DELETE FROM scholarships WHERE id = ?")
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Scholarship not found".to_string()));
    }

    Ok(Json(json!({ "message": "Scholarship deleted successfully" })))
}

pub async fn update_scholarship_status(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, AppError> {
    let status = payload
        .get("status")
        .and_then(Value::as_str)
        .and_then(ScholarshipStatus::parse)
        .ok_or_else(|| AppError::BadRequest("Invalid status".to_string()))?;

    let result = sqlx::query("UPDATE scholarships SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(&state.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Scholarship not found".to_string()));
    }

    Ok(Json(
        json!({ "message": "Scholarship status updated successfully" }),
    ))
}
