//! Free-text station search endpoint

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::db::models::StationHit;
use crate::db::stations;
use crate::AppState;

/// Query parameters for free-text search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// GET /search?q=
///
/// Returns the concatenation of every interpretation's result set for the
/// query's token count, duplicates preserved.
pub async fn search_stations(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<StationHit>>, SearchError> {
    // An absent or empty q is a request-level failure, not a 4xx
    let q = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or(SearchError::MissingQuery)?;

    let hits = stations::search(&state.db, &q)
        .await
        .map_err(|e| SearchError::Database(e.to_string()))?;

    Ok(Json(hits))
}

/// Search errors
#[derive(Debug)]
pub enum SearchError {
    MissingQuery,
    Database(String),
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let message = match self {
            SearchError::MissingQuery => "missing search parameter q".to_string(),
            SearchError::Database(msg) => format!("Database error: {}", msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
