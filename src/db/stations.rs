//! Station queries: search interpretations, viewport, lookup, and listing

use sqlx::SqlitePool;

use crate::db::models::{Station, StationHit};
use crate::error::Result;
use crate::geo::Viewport;
use crate::search::{self, Interpretation};

/// Columns shared by every place+station join, aliased to StationHit fields
const HIT_COLUMNS: &str = "s.id AS id, s.name AS name, s.call AS call, \
     s.freq AS freq, s.power AS power, s.url_stream AS url_stream, \
     s.city AS city, s.state AS state, p.lat AS lat, p.lng AS lng";

/// Run a free-text search: plan the interpretations for the query's token
/// count, execute each, and concatenate the result sets in plan order.
/// Duplicates across interpretations are preserved.
pub async fn search(pool: &SqlitePool, q: &str) -> Result<Vec<StationHit>> {
    let mut hits = Vec::new();
    for interpretation in search::plan(q) {
        hits.extend(run_interpretation(pool, &interpretation).await?);
    }
    Ok(hits)
}

/// Execute a single search interpretation as a place+station join
async fn run_interpretation(
    pool: &SqlitePool,
    interpretation: &Interpretation,
) -> Result<Vec<StationHit>> {
    let hits = match interpretation {
        Interpretation::PlaceCityOrState { pattern } => {
            let sql = format!(
                "SELECT {HIT_COLUMNS} FROM places p \
                 JOIN stations s ON s.city = p.city AND s.state = p.state \
                 WHERE p.city LIKE ? OR p.state LIKE ?"
            );
            sqlx::query_as::<_, StationHit>(&sql)
                .bind(pattern)
                .bind(pattern)
                .fetch_all(pool)
                .await?
        }
        Interpretation::PlaceCity { city } => {
            let sql = format!(
                "SELECT {HIT_COLUMNS} FROM places p \
                 JOIN stations s ON s.city = p.city AND s.state = p.state \
                 WHERE p.city LIKE ?"
            );
            sqlx::query_as::<_, StationHit>(&sql)
                .bind(city)
                .fetch_all(pool)
                .await?
        }
        Interpretation::PlaceCityState { city, state } => {
            let sql = format!(
                "SELECT {HIT_COLUMNS} FROM places p \
                 JOIN stations s ON s.city = p.city AND s.state = p.state \
                 WHERE p.city LIKE ? AND p.state LIKE ?"
            );
            sqlx::query_as::<_, StationHit>(&sql)
                .bind(city)
                .bind(state)
                .fetch_all(pool)
                .await?
        }
        Interpretation::StationNameOrCall { pattern } => {
            let sql = format!(
                "SELECT {HIT_COLUMNS} FROM stations s \
                 JOIN places p ON p.city = s.city AND p.state = s.state \
                 WHERE s.name LIKE ? OR s.call LIKE ?"
            );
            sqlx::query_as::<_, StationHit>(&sql)
                .bind(pattern)
                .bind(pattern)
                .fetch_all(pool)
                .await?
        }
        Interpretation::StationInCity { station, city } => {
            let sql = format!(
                "SELECT {HIT_COLUMNS} FROM stations s \
                 JOIN places p ON p.city = s.city AND p.state = s.state \
                 WHERE (s.name LIKE ? OR s.call LIKE ?) AND s.city LIKE ?"
            );
            sqlx::query_as::<_, StationHit>(&sql)
                .bind(station)
                .bind(station)
                .bind(city)
                .fetch_all(pool)
                .await?
        }
        Interpretation::StationInCityState { station, city, state } => {
            let sql = format!(
                "SELECT {HIT_COLUMNS} FROM stations s \
                 JOIN places p ON p.city = s.city AND p.state = s.state \
                 WHERE (s.name LIKE ? OR s.call LIKE ?) \
                 AND s.city LIKE ? AND s.state LIKE ?"
            );
            sqlx::query_as::<_, StationHit>(&sql)
                .bind(station)
                .bind(station)
                .bind(city)
                .bind(state)
                .fetch_all(pool)
                .await?
        }
        Interpretation::StationInPlace { station, place } => {
            let sql = format!(
                "SELECT {HIT_COLUMNS} FROM stations s \
                 JOIN places p ON p.city = s.city AND p.state = s.state \
                 WHERE (s.name LIKE ? OR s.call LIKE ?) \
                 AND (s.city LIKE ? OR s.state LIKE ?)"
            );
            sqlx::query_as::<_, StationHit>(&sql)
                .bind(station)
                .bind(station)
                .bind(place)
                .bind(place)
                .fetch_all(pool)
                .await?
        }
    };

    Ok(hits)
}

/// Stations whose place falls inside the viewport.
///
/// Latitude is always a range check. Longitude is a range check for a
/// normal box and a disjunction when the box wraps the ±180° meridian.
pub async fn in_viewport(pool: &SqlitePool, viewport: &Viewport) -> Result<Vec<StationHit>> {
    let lng_clause = if viewport.crosses_antimeridian() {
        "(? <= p.lng OR p.lng <= ?)"
    } else {
        "(? <= p.lng AND p.lng <= ?)"
    };

    let sql = format!(
        "SELECT {HIT_COLUMNS} FROM places p \
         JOIN stations s ON s.city = p.city AND s.state = p.state \
         WHERE ? <= p.lat AND p.lat <= ? AND {lng_clause}"
    );

    let hits = sqlx::query_as::<_, StationHit>(&sql)
        .bind(viewport.sw.lat)
        .bind(viewport.ne.lat)
        .bind(viewport.sw.lng)
        .bind(viewport.ne.lng)
        .fetch_all(pool)
        .await?;

    Ok(hits)
}

/// Stations matching a place (city AND state) or a stream URL.
///
/// Operator precedence follows the map page's marker/selection lookup:
/// (city AND state) OR stream.
pub async fn lookup(
    pool: &SqlitePool,
    city: &str,
    state: &str,
    stream: &str,
) -> Result<Vec<Station>> {
    let stations = sqlx::query_as::<_, Station>(
        "SELECT id, name, call, freq, power, url_stream, city, state \
         FROM stations WHERE (city = ? AND state = ?) OR url_stream = ?",
    )
    .bind(city)
    .bind(state)
    .bind(stream)
    .fetch_all(pool)
    .await?;

    Ok(stations)
}

/// Sort orders for the full station listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationSort {
    Name,
    Call,
    Place,
    Freq,
    Power,
}

impl StationSort {
    /// Map a query parameter to a sort order; unknown or absent values fall
    /// back to place ordering
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("name") => StationSort::Name,
            Some("call") => StationSort::Call,
            Some("freq") => StationSort::Freq,
            Some("power") => StationSort::Power,
            _ => StationSort::Place,
        }
    }

    /// Fixed ORDER BY clause; the whitelist above keeps user input out of
    /// the SQL text
    fn order_by(self) -> &'static str {
        match self {
            StationSort::Name => "name",
            StationSort::Call => "call",
            StationSort::Place => "state, city",
            StationSort::Freq => "freq",
            StationSort::Power => "power",
        }
    }
}

/// Full station listing in the requested order
pub async fn list_all(pool: &SqlitePool, sort: StationSort) -> Result<Vec<Station>> {
    let sql = format!(
        "SELECT id, name, call, freq, power, url_stream, city, state \
         FROM stations ORDER BY {}",
        sort.order_by()
    );

    let stations = sqlx::query_as::<_, Station>(&sql).fetch_all(pool).await?;

    Ok(stations)
}
