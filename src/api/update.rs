//! Viewport query endpoint

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
use crate::geo::{self, Viewport};
use crate::AppState;

/// Query parameters for the viewport query
#[derive(Debug, Deserialize)]
pub struct UpdateParams {
    pub sw: Option<String>,
    pub ne: Option<String>,
}

/// GET /update?sw=lat,lng&ne=lat,lng
///
/// Returns all stations whose place lies inside the viewport. A box whose
/// southwest longitude exceeds its northeast longitude wraps across the
/// ±180° meridian.
pub async fn update_viewport(
    State(state): State<AppState>,
    Query(params): Query<UpdateParams>,
) -> Result<Json<Vec<StationHit>>, UpdateError> {
    let sw_raw = params.sw.ok_or(UpdateError::MissingParam("sw"))?;
    let ne_raw = params.ne.ok_or(UpdateError::MissingParam("ne"))?;

    let sw = geo::parse_lat_lng(&sw_raw).ok_or(UpdateError::InvalidParam("sw"))?;
    let ne = geo::parse_lat_lng(&ne_raw).ok_or(UpdateError::InvalidParam("ne"))?;

    let viewport = Viewport { sw, ne };

    let hits = stations::in_viewport(&state.db, &viewport)
        .await
        .map_err(|e| UpdateError::Database(e.to_string()))?;

    Ok(Json(hits))
}

/// Viewport query errors
#[derive(Debug)]
pub enum UpdateError {
    MissingParam(&'static str),
    InvalidParam(&'static str),
    Database(String),
}

impl IntoResponse for UpdateError {
    fn into_response(self) -> Response {
        let message = match self {
            UpdateError::MissingParam(name) => format!("missing {}", name),
            UpdateError::InvalidParam(name) => format!("invalid {}", name),
            UpdateError::Database(msg) => format!("Database error: {}", msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
