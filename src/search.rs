//! Free-text search query planning
//!
//! A query string is stripped of punctuation, split into at most four
//! whitespace-separated tokens, and expanded into a fixed set of alternative
//! interpretations for its token count. Each interpretation maps to one SQL
//! lookup; the caller runs them in order and concatenates the result sets
//! without deduplication.

/// Placeholder token substituted when a query strips down to nothing.
/// Keeps the query well-formed while matching no real place or station.
const EMPTY_QUERY_TOKEN: &str = "xyz";

/// Maximum number of tokens a query may carry; longer queries return no plan
const MAX_TOKENS: usize = 4;

/// One way of reading the query, as a filtered place/station lookup.
///
/// Every pattern already carries its trailing `%` wildcard (and, for merged
/// tokens, an interior one), so the SQL side binds it to LIKE unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interpretation {
    /// Places whose city or state matches the pattern
    PlaceCityOrState { pattern: String },
    /// Places whose city matches the pattern
    PlaceCity { city: String },
    /// Places whose city and state match their respective patterns
    PlaceCityState { city: String, state: String },
    /// Stations whose name or call sign matches the pattern
    StationNameOrCall { pattern: String },
    /// Stations by name/call sign, narrowed to a city
    StationInCity { station: String, city: String },
    /// Stations by name/call sign, narrowed to a city and state
    StationInCityState { station: String, city: String, state: String },
    /// Stations by name/call sign, narrowed to a city-or-state match
    StationInPlace { station: String, place: String },
}

/// Strip ASCII punctuation from a raw query string
fn strip_punctuation(q: &str) -> String {
    q.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

/// Tokenize a raw query: strip punctuation, fall back to the placeholder
/// token when nothing remains, split on whitespace, and suffix each token
/// with the SQL prefix wildcard.
pub fn tokenize(q: &str) -> Vec<String> {
    let stripped = strip_punctuation(q);
    let cleaned = if stripped.trim().is_empty() {
        EMPTY_QUERY_TOKEN
    } else {
        stripped.as_str()
    };

    cleaned
        .split_whitespace()
        .map(|word| format!("{}%", word))
        .collect()
}

/// Build the interpretation plan for a raw query string.
///
/// Queries with more than four tokens yield an empty plan.
pub fn plan(q: &str) -> Vec<Interpretation> {
    let tokens = tokenize(q);

    match tokens.as_slice() {
        [t1] => vec![
            // city // state
            Interpretation::PlaceCityOrState {
                pattern: t1.clone(),
            },
            // name // call
            Interpretation::StationNameOrCall {
                pattern: t1.clone(),
            },
        ],
        [t1, t2] => vec![
            // city city
            Interpretation::PlaceCity {
                city: format!("{}{}", t1, t2),
            },
            // city, state
            Interpretation::PlaceCityState {
                city: t1.clone(),
                state: t2.clone(),
            },
            // name / call, city / state
            Interpretation::StationInPlace {
                station: t1.clone(),
                place: t2.clone(),
            },
        ],
        [t1, t2, t3] => vec![
            // city city, state
            Interpretation::PlaceCityState {
                city: format!("{}{}", t1, t2),
                state: t3.clone(),
            },
            // name / call, city city
            Interpretation::StationInCity {
                station: t1.clone(),
                city: format!("{}{}", t2, t3),
            },
            // name / call, city, state
            Interpretation::StationInCityState {
                station: t1.clone(),
                city: t2.clone(),
                state: t3.clone(),
            },
        ],
        [t1, t2, t3, t4] => vec![
            // name / call, city city, state
            Interpretation::StationInCityState {
                station: t1.clone(),
                city: format!("{}{}", t2, t3),
                state: t4.clone(),
            },
        ],
        tokens => {
            debug_assert!(tokens.is_empty() || tokens.len() > MAX_TOKENS);
            Vec::new()
        }
    }
}
