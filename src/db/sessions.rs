//! Session table operations

use sqlx::SqlitePool;

use crate::db::models::Session;
use crate::error::Result;

/// Insert a session row
pub async fn create(
    pool: &SqlitePool,
    token: &str,
    user_guid: &str,
    expires_at: &str,
) -> Result<()> {
    sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES (?, ?, ?)")
        .bind(token)
        .bind(user_guid)
        .bind(expires_at)
        .execute(pool)
        .await?;

    Ok(())
}

/// Look up a session by token
pub async fn get(pool: &SqlitePool, token: &str) -> Result<Option<Session>> {
    let session = sqlx::query_as::<_, Session>(
        "SELECT token, user_id, expires_at FROM sessions WHERE token = ?",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

/// Delete a session by token
pub async fn delete(pool: &SqlitePool, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(())
}
