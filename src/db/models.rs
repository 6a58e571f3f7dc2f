//! Database models

use serde::Serialize;
use sqlx::FromRow;

/// A registered account
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub guid: String,
    pub username: String,
    pub password_hash: String,
    pub password_salt: String,
}

/// A server-side session row; the token travels in the cookie
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub expires_at: String,
}

/// A radio station
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Station {
    pub id: i64,
    pub name: String,
    pub call: String,
    pub freq: f64,
    pub power: f64,
    pub url_stream: String,
    pub city: String,
    pub state: String,
}

/// A station joined with its place coordinates, as returned by search and
/// viewport queries
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StationHit {
    pub id: i64,
    pub name: String,
    pub call: String,
    pub freq: f64,
    pub power: f64,
    pub url_stream: String,
    pub city: String,
    pub state: String,
    pub lat: f64,
    pub lng: f64,
}
