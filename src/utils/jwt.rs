use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::admin_user::AdminUser;

/// Bearer-token claims carried by every authenticated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Admin-user id.
    pub sub: i64,
    pub username: String,
    pub role: String,
    /// Expiration time (unix seconds).
    pub exp: i64,
    /// Issued at (unix seconds).
    pub iat: i64,
}

impl Claims {
    pub fn new(user: &AdminUser, expiration_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours as i64);
        Claims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        }
    }
}

pub fn create_token(user: &AdminUser, secret: &str, expiration_hours: u64) -> anyhow::Result<String> {
    let claims = Claims::new(user, expiration_hours);
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?;

    Ok(token)
}

/// Checks signature and expiry; any failure (bad signature, malformed token,
/// expired) surfaces as an error.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;

    Ok(token_data.claims)
}
