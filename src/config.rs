use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_expiration_hours: u64,
    pub port: u16,
    pub cors_origin: String,
    pub rate_limit_max_requests: u32,
    pub rate_limit_window_seconds: u64,
    pub default_admin_password: String,
    pub environment: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:bolsas.db?mode=rwc".to_string());

        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "your-secret-key-change-this-in-production".to_string());

        let jwt_expiration_hours = env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse()
            .unwrap_or(24);

        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        let cors_origin = env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".to_string());

        let rate_limit_max_requests = env::var("RATE_LIMIT_MAX_REQUESTS")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .unwrap_or(100);

        let rate_limit_window_seconds = env::var("RATE_LIMIT_WINDOW_SECONDS")
            .unwrap_or_else(|_| "900".to_string())
            .parse()
            .unwrap_or(900);

        let default_admin_password =
            env::var("DEFAULT_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

        let environment = env::var("APP_ENV").unwrap_or_else(|_| "production".to_string());

        Ok(Config {
            database_url,
            jwt_secret,
            jwt_expiration_hours,
            port,
            cors_origin,
            rate_limit_max_requests,
            rate_limit_window_seconds,
            default_admin_password,
            environment,
        })
    }
}
