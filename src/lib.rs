//! radiomap library - location-aware radio station directory
//!
//! Search and browse radio stations geographically, view station metadata,
//! and (when logged in) keep a short list of favourites.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod geo;
pub mod search;
pub mod session;

pub use error::{Error, Result};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Map provider API key; `/` fails without it
    pub map_api_key: Option<String>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, map_api_key: Option<String>) -> Self {
        Self { db, map_api_key }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::map_page))
        .route("/search", get(api::search_stations))
        .route("/update", get(api::update_viewport))
        .route("/lookup", get(api::lookup_stations))
        .route("/stations", get(api::stations_page))
        .route(
            "/favourite",
            get(api::favourite_page).post(api::favourite_submit),
        )
        .route(
            "/register",
            get(api::register_page).post(api::register_submit),
        )
        .route("/login", post(api::login))
        .route("/logout", get(api::logout))
        .route("/about", get(api::about_page))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/api/buildinfo", get(api::get_build_info))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
