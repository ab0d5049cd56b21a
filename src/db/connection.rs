use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::utils::password::hash_password;

pub type DbPool = SqlitePool;

/// Opens the SQLite pool. The pool is capped at a single connection so that
/// concurrent queries queue at the pool instead of contending for the
/// database file.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Cheap liveness probe used by the `/api/test-db` diagnostic route.
pub async fn test_connection(pool: &DbPool) -> bool {
    sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(pool)
        .await
        .is_ok()
}

/// Seeds the default `admin` account when no admin user exists yet, so a
/// fresh deployment is reachable without manual SQL.
pub async fn ensure_default_admin(pool: &DbPool, default_password: &str) -> anyhow::Result<()> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_users")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(());
    }

    let password_hash = hash_password(default_password)?;
    sqlx::query("INSERT INTO admin_users (username, password_hash, role) VALUES ('admin', ?, 'admin')")
        .bind(&password_hash)
        .execute(pool)
        .await?;

    tracing::warn!("seeded default admin account; change its password before going live");
    Ok(())
}
