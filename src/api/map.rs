//! Map home page

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::api::ui::{html_escape, render_nav, INDEX_HTML};
use crate::db::favourites;
use crate::{session, AppState};

/// GET /
///
/// Renders the map page. Requires the map provider API key; shows the
/// logged-in user's favourites beneath the map.
pub async fn map_page(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Html<String>, IndexError> {
    let api_key = state
        .map_api_key
        .as_deref()
        .ok_or(IndexError::ApiKeyMissing)?;

    let user = session::current_user(&state.db, &headers)
        .await
        .map_err(|e| IndexError::Database(e.to_string()))?;

    let favourites = match &user {
        Some(user) => favourites::stations_for_user(&state.db, &user.guid)
            .await
            .map_err(|e| IndexError::Database(e.to_string()))?,
        None => Vec::new(),
    };

    let favourite_list = if favourites.is_empty() {
        "<p>No favourites yet.</p>".to_string()
    } else {
        let items: Vec<String> = favourites
            .iter()
            .map(|s| {
                format!(
                    "<li>{} ({}) {} - {}, {}</li>",
                    html_escape(&s.name),
                    html_escape(&s.call),
                    s.freq,
                    html_escape(&s.city),
                    html_escape(&s.state)
                )
            })
            .collect();
        format!("<ul>{}</ul>", items.join(""))
    };

    let username = user.map(|u| u.username);
    let page = INDEX_HTML
        .replace("{{NAV}}", &render_nav(username.as_deref(), "/"))
        .replace("{{MAP_API_KEY}}", api_key)
        .replace("{{FAVOURITES}}", &favourite_list);

    Ok(Html(page))
}

/// Map page errors
#[derive(Debug)]
pub enum IndexError {
    ApiKeyMissing,
    Database(String),
}

impl IntoResponse for IndexError {
    fn into_response(self) -> Response {
        let message = match self {
            IndexError::ApiKeyMissing => "MAP_API_KEY not set".to_string(),
            IndexError::Database(msg) => format!("Database error: {}", msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
