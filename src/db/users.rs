//! User table operations

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::models::User;
use crate::error::Result;

/// Insert a new user with a fresh guid; returns the stored row
pub async fn create(
    pool: &SqlitePool,
    username: &str,
    password_hash: &str,
    password_salt: &str,
) -> Result<User> {
    let guid = Uuid::new_v4().to_string();

    sqlx::query(
        "INSERT INTO users (guid, username, password_hash, password_salt) \
         VALUES (?, ?, ?, ?)",
    )
    .bind(&guid)
    .bind(username)
    .bind(password_hash)
    .bind(password_salt)
    .execute(pool)
    .await?;

    Ok(User {
        guid,
        username: username.to_string(),
        password_hash: password_hash.to_string(),
        password_salt: password_salt.to_string(),
    })
}

/// Look up a user by username
pub async fn by_username(pool: &SqlitePool, username: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT guid, username, password_hash, password_salt \
         FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Look up a user by guid
pub async fn by_guid(pool: &SqlitePool, guid: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT guid, username, password_hash, password_salt \
         FROM users WHERE guid = ?",
    )
    .bind(guid)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
