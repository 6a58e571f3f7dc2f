//! Station lookup endpoint

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::db::models::Station;
use crate::db::stations;
use crate::AppState;

/// Query parameters for lookup; absent parameters default to empty strings
#[derive(Debug, Deserialize)]
pub struct LookupParams {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub stream: String,
}

/// GET /lookup?city=&state=&stream=
///
/// Resolves the station list for a clicked map marker (city+state) or for
/// a current stream selection (stream URL).
pub async fn lookup_stations(
    State(state): State<AppState>,
    Query(params): Query<LookupParams>,
) -> Result<Json<Vec<Station>>, LookupError> {
    let matches = stations::lookup(&state.db, &params.city, &params.state, &params.stream)
        .await
        .map_err(|e| LookupError::Database(e.to_string()))?;

    Ok(Json(matches))
}

/// Lookup errors
#[derive(Debug)]
pub enum LookupError {
    Database(String),
}

impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let LookupError::Database(msg) = self;

        let body = Json(json!({
            "error": format!("Database error: {}", msg),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
