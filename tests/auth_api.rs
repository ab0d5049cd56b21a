use axum::http::StatusCode;
use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use tower::ServiceExt;

mod support;

use support::{
    body_json, create_test_token, empty_request, get_request, json_request, seed_admin, test_app,
    test_pool, TEST_JWT_SECRET,
};

#[tokio::test]
async fn test_login_returns_token_and_principal() {
    let pool = test_pool().await;
    let admin = seed_admin(&pool, "admin", "admin").await;
    let app = test_app(pool);

    let request = json_request(
        "POST",
        "/api/auth/login",
        None,
        &json!({ "username": "admin", "password": "password123" }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Login successful");
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["id"], admin.id);
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let pool = test_pool().await;
    seed_admin(&pool, "admin", "admin").await;
    let app = test_app(pool);

    let request = json_request(
        "POST",
        "/api/auth/login",
        None,
        &json!({ "username": "admin", "password": "wrong-password" }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid credentials");
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_rejects_unknown_user_with_same_error() {
    let pool = test_pool().await;
    let app = test_app(pool);

    let request = json_request(
        "POST",
        "/api/auth/login",
        None,
        &json!({ "username": "nobody", "password": "password123" }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_payload_is_validated_before_the_handler() {
    let pool = test_pool().await;
    let app = test_app(pool);

    let request = json_request(
        "POST",
        "/api/auth/login",
        None,
        &json!({ "username": "ab", "password": "123" }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    let details: Vec<String> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect();
    assert!(details.contains(&"username must have at least 3 characters".to_string()));
    assert!(details.contains(&"password must have at least 6 characters".to_string()));
}

#[tokio::test]
async fn test_verify_without_header_is_unauthorized() {
    let pool = test_pool().await;
    let app = test_app(pool);

    let response = app
        .oneshot(get_request("/api/auth/verify", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Token not provided");
}

#[tokio::test]
async fn test_verify_rejects_garbage_token() {
    let pool = test_pool().await;
    seed_admin(&pool, "admin", "admin").await;
    let app = test_app(pool);

    let response = app
        .oneshot(get_request("/api/auth/verify", Some("not-a-jwt")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn test_verify_rejects_expired_token() {
    let pool = test_pool().await;
    let admin = seed_admin(&pool, "admin", "admin").await;
    let app = test_app(pool);

    let past = Utc::now().timestamp() - 7200;
    let claims = json!({
        "sub": admin.id,
        "username": admin.username,
        "role": admin.role,
        "exp": past,
        "iat": past - 3600,
    });
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap();

    let response = app
        .oneshot(get_request("/api/auth/verify", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid token");
}

#[tokio::test]
async fn test_verify_rejects_token_of_deleted_account() {
    let pool = test_pool().await;
    let admin = seed_admin(&pool, "admin", "admin").await;
    let token = create_test_token(&admin);

    sqlx::query("DELETE FROM admin_users WHERE id = ?")
        .bind(admin.id)
        .execute(&pool)
        .await
        .unwrap();

    let app = test_app(pool);
    let response = app
        .oneshot(get_request("/api/auth/verify", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn test_verify_echoes_current_principal() {
    let pool = test_pool().await;
    let admin = seed_admin(&pool, "rita", "admin").await;
    let token = create_test_token(&admin);
    let app = test_app(pool);

    let response = app
        .oneshot(get_request("/api/auth/verify", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["user"]["username"], "rita");
}

#[tokio::test]
async fn test_logout_requires_a_valid_token() {
    let pool = test_pool().await;
    let admin = seed_admin(&pool, "admin", "admin").await;
    let token = create_test_token(&admin);
    let app = test_app(pool);

    let response = app
        .clone()
        .oneshot(empty_request("POST", "/api/auth/logout", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(empty_request("POST", "/api/auth/logout", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Logout successful");
}

#[tokio::test]
async fn test_unknown_route_returns_json_not_found() {
    let pool = test_pool().await;
    let app = test_app(pool);

    let response = app
        .oneshot(get_request("/api/does-not-exist", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Route not found");
    assert_eq!(body["code"], "NOT_FOUND");
}
