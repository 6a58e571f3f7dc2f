//! Favourite table operations
//!
//! The 5-favourite cap and duplicate rejection live in the handler as a
//! check-then-act sequence; these are the individual steps.

use sqlx::SqlitePool;

use crate::db::models::Station;
use crate::error::Result;

/// Number of favourites a user currently holds
pub async fn count(pool: &SqlitePool, user_guid: &str) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favourites WHERE user_id = ?")
        .bind(user_guid)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Whether a (user, station) favourite already exists
pub async fn exists(pool: &SqlitePool, user_guid: &str, station_id: i64) -> Result<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM favourites WHERE user_id = ? AND station_id = ?",
    )
    .bind(user_guid)
    .bind(station_id)
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}

/// Insert a favourite row
pub async fn add(pool: &SqlitePool, user_guid: &str, station_id: i64) -> Result<()> {
    sqlx::query("INSERT INTO favourites (user_id, station_id) VALUES (?, ?)")
        .bind(user_guid)
        .bind(station_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Delete a favourite row; deleting an absent pair is not an error
pub async fn remove(pool: &SqlitePool, user_guid: &str, station_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM favourites WHERE user_id = ? AND station_id = ?")
        .bind(user_guid)
        .bind(station_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// All of a user's favourites joined with station data
pub async fn stations_for_user(pool: &SqlitePool, user_guid: &str) -> Result<Vec<Station>> {
    let stations = sqlx::query_as::<_, Station>(
        "SELECT s.id AS id, s.name AS name, s.call AS call, s.freq AS freq, \
         s.power AS power, s.url_stream AS url_stream, s.city AS city, s.state AS state \
         FROM favourites f JOIN stations s ON f.station_id = s.id \
         WHERE f.user_id = ?",
    )
    .bind(user_guid)
    .fetch_all(pool)
    .await?;

    Ok(stations)
}
