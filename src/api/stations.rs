//! Full station listing page

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::ui::{html_escape, render_nav, render_notice, STATIONS_HTML};
use crate::db::models::Station;
use crate::db::stations::{self, StationSort};
use crate::{session, AppState};

/// Query parameters for the station listing
#[derive(Debug, Deserialize)]
pub struct StationsParams {
    pub sort: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// GET /stations?sort=name|call|place|freq|power
///
/// Full listing as HTML; the notice banner reflects the outcome flags set
/// by favourite submissions.
pub async fn stations_page(
    State(state): State<AppState>,
    Query(params): Query<StationsParams>,
    headers: HeaderMap,
) -> Result<Html<String>, StationsError> {
    let sort = StationSort::from_param(params.sort.as_deref());

    let stations = stations::list_all(&state.db, sort)
        .await
        .map_err(|e| StationsError::Database(e.to_string()))?;

    let user = session::current_user(&state.db, &headers)
        .await
        .map_err(|e| StationsError::Database(e.to_string()))?;

    let notice = match (params.error.as_deref(), params.success.as_deref()) {
        (Some("limit"), _) => Some("Favourite limit reached (maximum 5)."),
        (Some("taken"), _) => Some("Station is already a favourite."),
        (_, Some(_)) => Some("Favourite added."),
        _ => None,
    };

    let rows = render_rows(&stations, user.is_some());
    let username = user.map(|u| u.username);

    let page = STATIONS_HTML
        .replace("{{NAV}}", &render_nav(username.as_deref(), "/stations"))
        .replace("{{NOTICE}}", &render_notice(notice))
        .replace("{{ROWS}}", &rows);

    Ok(Html(page))
}

/// Table rows; logged-in users get an add-favourite button per station
fn render_rows(stations: &[Station], logged_in: bool) -> String {
    stations
        .iter()
        .map(|s| {
            let action = if logged_in {
                format!(
                    concat!(
                        r#"<form action="/favourite" method="post">"#,
                        r#"<input type="hidden" name="add" value="{}">"#,
                        r#"<button type="submit">Add favourite</button></form>"#,
                    ),
                    s.id
                )
            } else {
                String::new()
            };

            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}, {}</td><td>{}</td></tr>",
                html_escape(&s.name),
                html_escape(&s.call),
                s.freq,
                s.power,
                html_escape(&s.city),
                html_escape(&s.state),
                action
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Station listing errors
#[derive(Debug)]
pub enum StationsError {
    Database(String),
}

impl IntoResponse for StationsError {
    fn into_response(self) -> Response {
        let StationsError::Database(msg) = self;

        let body = Json(json!({
            "error": format!("Database error: {}", msg),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
