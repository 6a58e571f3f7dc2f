//! Shared helpers for radiomap integration tests
//!
//! Each test gets its own temporary SQLite database seeded with a small set
//! of reference places and stations, and drives the router directly with
//! tower's oneshot.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use serde_json::Value;
use sqlx::SqlitePool;
use tempfile::TempDir;

use radiomap::{build_router, db, AppState};

/// Create a fresh database in a temporary directory.
///
/// The TempDir must be kept alive for the duration of the test.
pub async fn setup_db() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().expect("Should create temp dir");
    let pool = db::init_database(&dir.path().join("radio.db"))
        .await
        .expect("Should initialize database");
    (dir, pool)
}

/// Insert reference places and stations used across the tests.
///
/// "New York" in state "York" is deliberate: the two-token query
/// "new york" then matches all three of its interpretations, so the
/// union-with-duplicates property is observable.
pub async fn seed_reference_data(pool: &SqlitePool) {
    let places: &[(&str, &str, f64, f64)] = &[
        ("New York", "York", 40.71, -74.00),
        ("Boston", "Massachusetts", 42.36, -71.06),
        ("Suva", "Fiji", -18.14, 178.44),
        ("Pago Pago", "American Samoa", -14.27, -170.70),
    ];

    for (city, state, lat, lng) in places {
        sqlx::query("INSERT INTO places (city, state, lat, lng) VALUES (?, ?, ?, ?)")
            .bind(city)
            .bind(state)
            .bind(lat)
            .bind(lng)
            .execute(pool)
            .await
            .expect("Should insert place");
    }

    let stations: &[(i64, &str, &str, f64, f64, &str, &str, &str)] = &[
        (1, "New York FM", "WNYF", 101.1, 50000.0, "http://streams.example/wnyf", "New York", "York"),
        (2, "Boston Classical", "WCRB", 99.5, 40000.0, "http://streams.example/wcrb", "Boston", "Massachusetts"),
        (3, "South Seas Radio", "ZFJ1", 88.1, 10000.0, "http://streams.example/zfj1", "Suva", "Fiji"),
        (4, "Island Sound", "WVUV", 92.3, 5000.0, "http://streams.example/wvuv", "Pago Pago", "American Samoa"),
        (5, "North Shore Jazz", "WNSJ", 90.9, 8000.0, "http://streams.example/wnsj", "Boston", "Massachusetts"),
        (6, "Harbor Rock", "WHRB", 104.7, 12000.0, "http://streams.example/whrb", "Boston", "Massachusetts"),
        (7, "Metro News", "WMNY", 97.1, 30000.0, "http://streams.example/wmny", "New York", "York"),
    ];

    for (id, name, call, freq, power, url, city, state) in stations {
        sqlx::query(
            "INSERT INTO stations (id, name, call, freq, power, url_stream, city, state) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(call)
        .bind(freq)
        .bind(power)
        .bind(url)
        .bind(city)
        .bind(state)
        .execute(pool)
        .await
        .expect("Should insert station");
    }
}

/// App with the map API key configured
pub fn setup_app(pool: SqlitePool) -> Router {
    build_router(AppState::new(pool, Some("test-api-key".to_string())))
}

/// App without a map API key (startup with MAP_API_KEY unset)
pub fn setup_app_without_key(pool: SqlitePool) -> Router {
    build_router(AppState::new(pool, None))
}

/// Build a GET request, optionally carrying a session cookie
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// Build a form POST request, optionally carrying a session cookie
pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Extract a JSON body
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Extract a text body
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Should be UTF-8")
}

/// The Location header of a redirect response
pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("Response should carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// The session cookie set by a response, in Cookie-header form
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    let pair = set_cookie.split(';').next()?;
    Some(pair.trim().to_string())
}
