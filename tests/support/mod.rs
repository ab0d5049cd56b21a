#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, Response},
    Router,
};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;

use bolsas_backend::{
    config::Config,
    db::connection::DbPool,
    models::admin_user::AdminUser,
    routes,
    state::AppState,
    utils::{jwt, password},
};

pub const TEST_JWT_SECRET: &str = "test-secret";

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiration_hours: 1,
        port: 0,
        cors_origin: "*".to_string(),
        rate_limit_max_requests: 1000,
        rate_limit_window_seconds: 60,
        default_admin_password: "admin123".to_string(),
        environment: "test".to_string(),
    }
}

pub async fn test_pool() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");
    pool
}

pub fn test_app(pool: DbPool) -> Router {
    routes::router(AppState::new(pool, test_config()))
}

pub async fn seed_admin(pool: &DbPool, username: &str, role: &str) -> AdminUser {
    let hash = password::hash_password("password123").expect("hash password");
    sqlx::query("INSERT INTO admin_users (username, password_hash, role) VALUES (?, ?, ?)")
        .bind(username)
        .bind(&hash)
        .bind(role)
        .execute(pool)
        .await
        .expect("insert admin user");

    sqlx::query_as::<_, AdminUser>(
        "SELECT id, username, password_hash, role, created_at FROM admin_users WHERE username = ?",
    )
    .bind(username)
    .fetch_one(pool)
    .await
    .expect("fetch seeded admin user")
}

pub async fn seed_application(pool: &DbPool, name: &str, email: &str, status: &str) -> i64 {
    let result = sqlx::query(
        "INSERT INTO applications (nome_completo, email, telefone, curso, universidade, status) \
         VALUES (?, ?, '+244 923 000 000', 'Engenharia Informática', \
                 'Universidade Agostinho Neto', ?)",
    )
    .bind(name)
    .bind(email)
    .bind(status)
    .execute(pool)
    .await
    .expect("insert application");
    result.last_insert_rowid()
}

pub async fn seed_scholarship(pool: &DbPool, nome: &str, status: &str, data_fim: &str) -> i64 {
    let result = sqlx::query(
        "INSERT INTO scholarships (nome, descricao, valor, duracao_meses, vagas_disponiveis, \
                                   status, data_inicio, data_fim) \
         VALUES (?, 'Bolsa de estudos', 50000.0, 12, 10, ?, '2025-01-01', ?)",
    )
    .bind(nome)
    .bind(status)
    .bind(data_fim)
    .execute(pool)
    .await
    .expect("insert scholarship");
    result.last_insert_rowid()
}

pub fn create_test_token(user: &AdminUser) -> String {
    jwt::create_token(user, TEST_JWT_SECRET, 1).expect("create token")
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("build request")
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("build request")
}

pub fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    builder.body(Body::empty()).expect("build request")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("parse json body")
}
