//! Embedded UI pages and shared rendering helpers
//!
//! Pages are compiled in with include_str! and filled in with simple
//! placeholder substitution.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::{session, AppState};

pub const INDEX_HTML: &str = include_str!("../ui/index.html");
pub const STATIONS_HTML: &str = include_str!("../ui/stations.html");
pub const FAVOURITES_HTML: &str = include_str!("../ui/favourites.html");
pub const REGISTER_HTML: &str = include_str!("../ui/register.html");
pub const ABOUT_HTML: &str = include_str!("../ui/about.html");
const APP_JS: &str = include_str!("../ui/app.js");

/// Escape text for interpolation into HTML
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Navigation bar shared by all pages.
///
/// Anonymous visitors get a login form; the form posts the current path in
/// the `submit` field so a successful login returns to the same page.
pub fn render_nav(username: Option<&str>, current_path: &str) -> String {
    let links = concat!(
        r#"<a href="/">Map</a> <a href="/stations">Stations</a> "#,
        r#"<a href="/favourite">Favourites</a> <a href="/about">About</a>"#,
    );

    match username {
        Some(name) => format!(
            concat!(
                r#"<nav>{} <form action="/logout" method="get">"#,
                r#"<span>{}</span> <button type="submit">Log out</button>"#,
                r#"</form></nav>"#,
            ),
            links,
            html_escape(name)
        ),
        None => format!(
            concat!(
                r#"<nav>{} <form action="/login" method="post">"#,
                r#"<input type="text" name="username" placeholder="username">"#,
                r#"<input type="password" name="password" placeholder="password">"#,
                r#"<input type="hidden" name="submit" value="{}">"#,
                r#"<button type="submit">Log in</button>"#,
                r#" <a href="/register">Register</a>"#,
                r#"</form></nav>"#,
            ),
            links,
            html_escape(current_path)
        ),
    }
}

/// A notice banner, or nothing
pub fn render_notice(message: Option<&str>) -> String {
    match message {
        Some(text) => format!(r#"<div class="notice">{}</div>"#, html_escape(text)),
        None => String::new(),
    }
}

/// GET /static/app.js
pub async fn serve_app_js() -> Response {
    (
        StatusCode::OK,
        [("content-type", "application/javascript")],
        APP_JS,
    )
        .into_response()
}

/// GET /about
pub async fn about_page(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let username = match session::current_user(&state.db, &headers).await {
        Ok(user) => user.map(|u| u.username),
        Err(_) => None,
    };

    let page = ABOUT_HTML.replace("{{NAV}}", &render_nav(username.as_deref(), "/about"));
    Html(page).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_html_metacharacters() {
        assert_eq!(html_escape(r#"<b>&"'"#), "&lt;b&gt;&amp;&quot;&#39;");
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn nav_shows_login_form_when_anonymous() {
        let nav = render_nav(None, "/stations");
        assert!(nav.contains(r#"action="/login""#));
        assert!(nav.contains(r#"value="/stations""#));
    }

    #[test]
    fn nav_shows_logout_when_logged_in() {
        let nav = render_nav(Some("alice"), "/");
        assert!(nav.contains("alice"));
        assert!(nav.contains("/logout"));
    }

    #[test]
    fn notice_renders_only_when_present() {
        assert_eq!(render_notice(None), "");
        assert!(render_notice(Some("Favourite added.")).contains("notice"));
    }
}
