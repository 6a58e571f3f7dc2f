//! Registration, login, and logout
//!
//! Failures are reported via redirect with a query-string flag read by the
//! page, never via structured error codes. Login failures are deliberately
//! indistinguishable: missing fields, unknown username, and wrong password
//! all redirect to `/?error=1`.

use axum::{
    extract::{Query, State},
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::api::ui::{render_nav, render_notice, REGISTER_HTML};
use crate::db::users;
use crate::{auth, session, AppState};

/// Pages a successful login may redirect back to
const LOGIN_TARGETS: &[&str] = &["/", "/stations", "/favourite", "/about", "/register"];

/// Query parameters for the registration page
#[derive(Debug, Deserialize)]
pub struct RegisterPageParams {
    pub error: Option<String>,
}

/// Registration form body
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirmation: String,
}

/// Login form body; `submit` names the page the form was posted from
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    pub submit: Option<String>,
}

/// GET /register
pub async fn register_page(Query(params): Query<RegisterPageParams>) -> Html<String> {
    let notice = match params.error.as_deref() {
        Some("username") => Some("Username is required."),
        Some("password") => Some("Password is required."),
        Some("confirmation") => Some("Password confirmation is required."),
        Some("mismatch") => Some("Password and confirmation do not match."),
        Some("taken") => Some("That username is taken."),
        _ => None,
    };

    let page = REGISTER_HTML
        .replace("{{NAV}}", &render_nav(None, "/register"))
        .replace("{{NOTICE}}", &render_notice(notice));

    Html(page)
}

/// POST /register
///
/// Validates the form, creates the user, and logs them in immediately.
pub async fn register_submit(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, AccountError> {
    // Server-side checks mirror the page's client-side ones
    if form.username.is_empty() {
        return Ok(Redirect::to("/register?error=username").into_response());
    }
    if form.password.is_empty() {
        return Ok(Redirect::to("/register?error=password").into_response());
    }
    if form.confirmation.is_empty() {
        return Ok(Redirect::to("/register?error=confirmation").into_response());
    }
    if form.password != form.confirmation {
        return Ok(Redirect::to("/register?error=mismatch").into_response());
    }

    let existing = users::by_username(&state.db, &form.username)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;
    if existing.is_some() {
        return Ok(Redirect::to("/register?error=taken").into_response());
    }

    let salt = auth::generate_salt();
    let hash = auth::hash_password(&salt, &form.password);

    let user = users::create(&state.db, &form.username, &hash, &salt)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

    info!("Registered user {}", user.username);

    // Log the new user in immediately
    let token = session::open(&state.db, &user.guid)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

    Ok((
        AppendHeaders([(SET_COOKIE, session::session_cookie(&token))]),
        Redirect::to("/"),
    )
        .into_response())
}

/// POST /login
///
/// Any prior session is cleared first. All failure modes produce the same
/// redirect so usernames cannot be enumerated.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Response, AccountError> {
    // Forget any existing session
    session::close(&state.db, &headers)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

    if form.username.is_empty() || form.password.is_empty() {
        return Ok(Redirect::to("/?error=1").into_response());
    }

    let user = users::by_username(&state.db, &form.username)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

    let verified = user.as_ref().is_some_and(|user| {
        auth::verify_password(&user.password_salt, &user.password_hash, &form.password)
    });

    let Some(user) = user.filter(|_| verified) else {
        return Ok(Redirect::to("/?error=1").into_response());
    };

    let token = session::open(&state.db, &user.guid)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

    // Return to the page the form was posted from
    let target = form
        .submit
        .as_deref()
        .filter(|t| LOGIN_TARGETS.contains(t))
        .unwrap_or("/");

    Ok((
        AppendHeaders([(SET_COOKIE, session::session_cookie(&token))]),
        Redirect::to(target),
    )
        .into_response())
}

/// GET /logout
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AccountError> {
    session::close(&state.db, &headers)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

    Ok((
        AppendHeaders([(SET_COOKIE, session::clear_session_cookie())]),
        Redirect::to("/"),
    )
        .into_response())
}

/// Account errors
#[derive(Debug)]
pub enum AccountError {
    Database(String),
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let AccountError::Database(msg) = self;

        let body = Json(json!({
            "error": format!("Database error: {}", msg),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
