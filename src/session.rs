//! Server-side sessions
//!
//! The browser holds only an opaque session token in a cookie; the token
//! maps to a row in the `sessions` table carrying the user id and an expiry
//! timestamp. Expired rows are treated as absent and deleted on lookup.

use axum::http::{header::COOKIE, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::db::{self, models::User};
use crate::error::Result;
use sqlx::SqlitePool;

/// Session cookie name
pub const SESSION_COOKIE: &str = "session";

/// Sessions expire this long after creation
const SESSION_TTL_DAYS: i64 = 7;

/// Extract the session token from a request's Cookie headers
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    for value in headers.get_all(COOKIE) {
        let Ok(raw) = value.to_str() else { continue };
        for pair in raw.split(';') {
            if let Some((name, token)) = pair.trim().split_once('=') {
                if name == SESSION_COOKIE && !token.is_empty() {
                    return Some(token.to_string());
                }
            }
        }
    }
    None
}

/// Set-Cookie value establishing a session
pub fn session_cookie(token: &str) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token)
}

/// Set-Cookie value clearing the session cookie
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE)
}

/// Open a new session for a user, returning the token for the cookie
pub async fn open(db: &SqlitePool, user_guid: &str) -> Result<String> {
    let token = Uuid::new_v4().to_string();
    let expires_at = (Utc::now() + Duration::days(SESSION_TTL_DAYS)).to_rfc3339();

    db::sessions::create(db, &token, user_guid, &expires_at).await?;

    Ok(token)
}

/// Close the session named by the request's cookie, if any
pub async fn close(db: &SqlitePool, headers: &HeaderMap) -> Result<()> {
    if let Some(token) = token_from_headers(headers) {
        db::sessions::delete(db, &token).await?;
    }
    Ok(())
}

/// Resolve the logged-in user for a request, if any.
///
/// Expired sessions count as logged out and are removed here.
pub async fn current_user(db: &SqlitePool, headers: &HeaderMap) -> Result<Option<User>> {
    let Some(token) = token_from_headers(headers) else {
        return Ok(None);
    };

    let Some(session) = db::sessions::get(db, &token).await? else {
        return Ok(None);
    };

    let expired = DateTime::parse_from_rfc3339(&session.expires_at)
        .map(|t| t < Utc::now())
        .unwrap_or(true);

    if expired {
        db::sessions::delete(db, &token).await?;
        return Ok(None);
    }

    db::users::by_guid(db, &session.user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn token_parsed_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; session=abc-123; other=1"),
        );
        assert_eq!(token_from_headers(&headers), Some("abc-123".to_string()));
    }

    #[test]
    fn missing_or_empty_cookie_yields_none() {
        let headers = HeaderMap::new();
        assert_eq!(token_from_headers(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("session="));
        assert_eq!(token_from_headers(&headers), None);
    }

    #[test]
    fn cookie_values_name_the_session_cookie() {
        assert!(session_cookie("tok").starts_with("session=tok;"));
        assert!(clear_session_cookie().contains("Max-Age=0"));
    }
}
