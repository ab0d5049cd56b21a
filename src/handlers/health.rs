use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::{db::connection::test_connection, error::AppError, state::AppState};

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "Scholarship programme API running",
        "database": "SQLite",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn test_db(State(state): State<AppState>) -> Json<Value> {
    let connected = test_connection(&state.pool).await;
    Json(json!({
        "database": if connected { "SQLite connected" } else { "Connection error" },
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Catch-all fallback so unknown routes still answer with the JSON error
/// envelope.
pub async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
