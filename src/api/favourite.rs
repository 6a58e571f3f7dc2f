//! Favourite management: view, add, delete
//!
//! All routes require a session; anonymous requests are redirected to the
//! map page. Add enforces the 5-favourite cap and duplicate rejection as a
//! check-then-act sequence; outcomes travel as query-string flags on the
//! redirect target.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::ui::{html_escape, render_nav, render_notice, FAVOURITES_HTML};
use crate::db::favourites;
use crate::db::models::Station;
use crate::{session, AppState};

/// Maximum number of favourites per user
pub const MAX_FAVOURITES: i64 = 5;

/// Query parameters for the favourites page
#[derive(Debug, Deserialize)]
pub struct FavouritePageParams {
    pub deleted: Option<String>,
}

/// Form body for favourite submissions: exactly one of `add` or `delete`
/// carries a station id
#[derive(Debug, Deserialize)]
pub struct FavouriteForm {
    pub add: Option<String>,
    pub delete: Option<String>,
}

/// GET /favourite
///
/// The logged-in user's favourites joined with station data.
pub async fn favourite_page(
    State(state): State<AppState>,
    Query(params): Query<FavouritePageParams>,
    headers: HeaderMap,
) -> Result<Response, FavouriteError> {
    let Some(user) = session::current_user(&state.db, &headers)
        .await
        .map_err(|e| FavouriteError::Database(e.to_string()))?
    else {
        return Ok(Redirect::to("/").into_response());
    };

    let stations = favourites::stations_for_user(&state.db, &user.guid)
        .await
        .map_err(|e| FavouriteError::Database(e.to_string()))?;

    let notice = params.deleted.map(|_| "Favourite removed.");

    let page = FAVOURITES_HTML
        .replace("{{NAV}}", &render_nav(Some(&user.username), "/favourite"))
        .replace("{{NOTICE}}", &render_notice(notice))
        .replace("{{ROWS}}", &render_rows(&stations));

    Ok(Html(page).into_response())
}

/// POST /favourite
///
/// Adds or deletes a favourite and redirects with an outcome flag.
pub async fn favourite_submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<FavouriteForm>,
) -> Result<Response, FavouriteError> {
    let Some(user) = session::current_user(&state.db, &headers)
        .await
        .map_err(|e| FavouriteError::Database(e.to_string()))?
    else {
        return Ok(Redirect::to("/").into_response());
    };

    if let Some(raw_id) = form.add {
        let station_id = parse_station_id(&raw_id)?;

        // Check-then-act; racing duplicate submissions are accepted as-is
        let count = favourites::count(&state.db, &user.guid)
            .await
            .map_err(|e| FavouriteError::Database(e.to_string()))?;
        if count >= MAX_FAVOURITES {
            return Ok(Redirect::to("/stations?error=limit").into_response());
        }

        let exists = favourites::exists(&state.db, &user.guid, station_id)
            .await
            .map_err(|e| FavouriteError::Database(e.to_string()))?;
        if exists {
            return Ok(Redirect::to("/stations?error=taken").into_response());
        }

        favourites::add(&state.db, &user.guid, station_id)
            .await
            .map_err(|e| FavouriteError::Database(e.to_string()))?;

        return Ok(Redirect::to("/stations?success=1").into_response());
    }

    if let Some(raw_id) = form.delete {
        let station_id = parse_station_id(&raw_id)?;

        // Deleting an absent pair is not an error
        favourites::remove(&state.db, &user.guid, station_id)
            .await
            .map_err(|e| FavouriteError::Database(e.to_string()))?;

        return Ok(Redirect::to("/favourite?deleted=1").into_response());
    }

    // Neither field set: nothing to do
    Ok(Redirect::to("/favourite").into_response())
}

fn parse_station_id(raw: &str) -> Result<i64, FavouriteError> {
    raw.parse::<i64>()
        .map_err(|_| FavouriteError::InvalidStationId(raw.to_string()))
}

fn render_rows(stations: &[Station]) -> String {
    stations
        .iter()
        .map(|s| {
            format!(
                concat!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}, {}</td>",
                    r#"<td><form action="/favourite" method="post">"#,
                    r#"<input type="hidden" name="delete" value="{}">"#,
                    r#"<button type="submit">Remove</button></form></td></tr>"#,
                ),
                html_escape(&s.name),
                html_escape(&s.call),
                s.freq,
                s.power,
                html_escape(&s.city),
                html_escape(&s.state),
                s.id
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Favourite errors
#[derive(Debug)]
pub enum FavouriteError {
    InvalidStationId(String),
    Database(String),
}

impl IntoResponse for FavouriteError {
    fn into_response(self) -> Response {
        let message = match self {
            FavouriteError::InvalidStationId(raw) => format!("invalid station id: {}", raw),
            FavouriteError::Database(msg) => format!("Database error: {}", msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
