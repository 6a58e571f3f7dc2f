//! Integration tests for the public JSON and HTML endpoints
//!
//! Covers the map page, free-text search, viewport queries, lookup, the
//! station listing, and the health/buildinfo endpoints.

mod helpers;

use axum::http::StatusCode;
use tower::util::ServiceExt; // for `oneshot`

use helpers::*;

// =============================================================================
// Health and build info
// =============================================================================

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let (_dir, pool) = setup_db().await;
    let app = setup_app(pool);

    let response = app.oneshot(get("/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "radiomap");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn buildinfo_reports_identification() {
    let (_dir, pool) = setup_db().await;
    let app = setup_app(pool);

    let response = app.oneshot(get("/api/buildinfo", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["version"].is_string());
    assert!(body["git_hash"].is_string());
    assert!(body["build_timestamp"].is_string());
}

// =============================================================================
// Map page
// =============================================================================

#[tokio::test]
async fn map_page_embeds_api_key() {
    let (_dir, pool) = setup_db().await;
    let app = setup_app(pool);

    let response = app.oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    assert!(body.contains("test-api-key"));
}

#[tokio::test]
async fn map_page_fails_without_api_key() {
    let (_dir, pool) = setup_db().await;
    let app = setup_app_without_key(pool);

    let response = app.oneshot(get("/", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// Free-text search
// =============================================================================

#[tokio::test]
async fn search_without_q_is_a_server_error() {
    let (_dir, pool) = setup_db().await;
    let app = setup_app(pool);

    let response = app
        .clone()
        .oneshot(get("/search", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    // An empty q behaves like a missing one
    let response = app.oneshot(get("/search?q=", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn two_token_search_is_union_of_all_interpretations() {
    let (_dir, pool) = setup_db().await;
    seed_reference_data(&pool).await;
    let app = setup_app(pool);

    // "new york" matches station 1 as merged city, as city+state, and as
    // station-name-within-place, so it appears three times
    let response = app.oneshot(get("/search?q=new%20york", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let hits = body.as_array().unwrap();

    let nyfm_hits = hits
        .iter()
        .filter(|hit| hit["name"] == "New York FM")
        .count();
    assert_eq!(nyfm_hits, 3);
}

#[tokio::test]
async fn single_token_search_tries_place_then_station_name() {
    let (_dir, pool) = setup_db().await;
    seed_reference_data(&pool).await;
    let app = setup_app(pool);

    // "boston" matches three stations by place and one of them again by
    // station name, duplicates preserved
    let response = app.oneshot(get("/search?q=boston", None)).await.unwrap();
    let body = body_json(response).await;
    let hits = body.as_array().unwrap();

    assert_eq!(hits.len(), 4);
    let classical_hits = hits
        .iter()
        .filter(|hit| hit["name"] == "Boston Classical")
        .count();
    assert_eq!(classical_hits, 2);
}

#[tokio::test]
async fn punctuation_only_query_behaves_like_xyz() {
    let (_dir, pool) = setup_db().await;
    seed_reference_data(&pool).await;
    let app = setup_app(pool);

    let response = app
        .clone()
        .oneshot(get("/search?q=%3F%21...", None)) // "?!..."
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let punctuation_body = body_json(response).await;

    let response = app.oneshot(get("/search?q=xyz", None)).await.unwrap();
    let xyz_body = body_json(response).await;

    assert_eq!(punctuation_body, xyz_body);
    assert_eq!(punctuation_body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn search_by_call_sign_prefix() {
    let (_dir, pool) = setup_db().await;
    seed_reference_data(&pool).await;
    let app = setup_app(pool);

    let response = app.oneshot(get("/search?q=zfj", None)).await.unwrap();
    let body = body_json(response).await;
    let hits = body.as_array().unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["call"], "ZFJ1");
    assert_eq!(hits[0]["lat"], -18.14);
}

#[tokio::test]
async fn five_token_search_returns_nothing() {
    let (_dir, pool) = setup_db().await;
    seed_reference_data(&pool).await;
    let app = setup_app(pool);

    let response = app
        .oneshot(get("/search?q=new%20york%20boston%20suva%20pago", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

// =============================================================================
// Viewport query
// =============================================================================

#[tokio::test]
async fn viewport_returns_only_stations_inside_box() {
    let (_dir, pool) = setup_db().await;
    seed_reference_data(&pool).await;
    let app = setup_app(pool);

    // Northeastern US box: New York and Boston, not the Pacific stations
    let response = app
        .oneshot(get("/update?sw=40,-75&ne=43,-70", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let mut ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|hit| hit["id"].as_i64().unwrap())
        .collect();
    ids.sort();
    ids.dedup();

    assert_eq!(ids, vec![1, 2, 5, 6, 7]);
}

#[tokio::test]
async fn viewport_crossing_antimeridian_uses_disjunction() {
    let (_dir, pool) = setup_db().await;
    seed_reference_data(&pool).await;
    let app = setup_app(pool);

    // sw longitude (170) > ne longitude (-160): the box wraps the ±180°
    // meridian and must pick up both Suva and Pago Pago
    let response = app
        .oneshot(get("/update?sw=-30,170&ne=0,-160", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let mut ids: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|hit| hit["id"].as_i64().unwrap())
        .collect();
    ids.sort();

    assert_eq!(ids, vec![3, 4]);
}

#[tokio::test]
async fn viewport_with_missing_or_malformed_corners_is_a_server_error() {
    let (_dir, pool) = setup_db().await;
    seed_reference_data(&pool).await;
    let app = setup_app(pool);

    for uri in [
        "/update",
        "/update?sw=40,-75",
        "/update?sw=abc,def&ne=43,-70",
        "/update?sw=40,-75&ne=1e3,-70",
        "/update?sw=40&ne=43,-70",
    ] {
        let response = app.clone().oneshot(get(uri, None)).await.unwrap();
        assert_eq!(
            response.status(),
            StatusCode::INTERNAL_SERVER_ERROR,
            "expected server error for {}",
            uri
        );
    }
}

// =============================================================================
// Lookup
// =============================================================================

#[tokio::test]
async fn lookup_by_city_and_state() {
    let (_dir, pool) = setup_db().await;
    seed_reference_data(&pool).await;
    let app = setup_app(pool);

    let response = app
        .oneshot(get("/lookup?city=Suva&state=Fiji", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["call"], "ZFJ1");
}

#[tokio::test]
async fn lookup_by_stream_url() {
    let (_dir, pool) = setup_db().await;
    seed_reference_data(&pool).await;
    let app = setup_app(pool);

    let response = app
        .oneshot(get(
            "/lookup?stream=http%3A%2F%2Fstreams.example%2Fwcrb",
            None,
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    let hits = body.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["name"], "Boston Classical");
}

#[tokio::test]
async fn lookup_with_no_parameters_matches_nothing() {
    let (_dir, pool) = setup_db().await;
    seed_reference_data(&pool).await;
    let app = setup_app(pool);

    let response = app.oneshot(get("/lookup", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

// =============================================================================
// Station listing
// =============================================================================

#[tokio::test]
async fn stations_default_order_is_by_state_then_city() {
    let (_dir, pool) = setup_db().await;
    seed_reference_data(&pool).await;
    let app = setup_app(pool);

    let response = app.oneshot(get("/stations", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    let samoa = body.find("Island Sound").unwrap();
    let fiji = body.find("South Seas Radio").unwrap();
    let boston = body.find("Boston Classical").unwrap();
    let york = body.find("New York FM").unwrap();

    assert!(samoa < fiji && fiji < boston && boston < york);
}

#[tokio::test]
async fn stations_sorted_by_name() {
    let (_dir, pool) = setup_db().await;
    seed_reference_data(&pool).await;
    let app = setup_app(pool);

    let response = app.oneshot(get("/stations?sort=name", None)).await.unwrap();
    let body = body_text(response).await;

    let order = [
        "Boston Classical",
        "Harbor Rock",
        "Island Sound",
        "Metro News",
        "New York FM",
        "North Shore Jazz",
        "South Seas Radio",
    ];
    let positions: Vec<usize> = order.iter().map(|name| body.find(name).unwrap()).collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test]
async fn stations_sorted_by_frequency() {
    let (_dir, pool) = setup_db().await;
    seed_reference_data(&pool).await;
    let app = setup_app(pool);

    let response = app.oneshot(get("/stations?sort=freq", None)).await.unwrap();
    let body = body_text(response).await;

    // 88.1 first, 104.7 last
    let lowest = body.find("South Seas Radio").unwrap();
    let highest = body.find("Harbor Rock").unwrap();
    assert!(lowest < highest);
}

#[tokio::test]
async fn stations_unknown_sort_falls_back_to_place_order() {
    let (_dir, pool) = setup_db().await;
    seed_reference_data(&pool).await;
    let app = setup_app(pool);

    let response = app
        .oneshot(get("/stations?sort=bogus", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_text(response).await;
    let samoa = body.find("Island Sound").unwrap();
    let york = body.find("New York FM").unwrap();
    assert!(samoa < york);
}
