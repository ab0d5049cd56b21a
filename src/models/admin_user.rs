//! Admin-panel accounts and the authentication payloads around them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database representation of an admin-panel account.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: NaiveDateTime,
}

impl AdminUser {
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Row exposed by the admin-user list; never carries the password hash.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AdminUserRow {
    pub id: i64,
    pub username: String,
    pub role: String,
    pub created_at: NaiveDateTime,
}

/// Principal subset embedded in login/verify responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub role: String,
}

impl From<&AdminUser> for UserInfo {
    fn from(user: &AdminUser) -> Self {
        UserInfo {
            id: user.id,
            username: user.username.clone(),
            role: user.role.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: UserInfo,
}

fn default_role() -> String {
    "admin".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CreateAdminUser {
    pub username: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

/// Self-service profile update; both parts are optional and a password
/// change always requires the current password.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}
