//! Geographic viewport parsing
//!
//! Map clients send the viewport as two `lat,lng` corners (southwest and
//! northeast). Corner strings must match a strict decimal grammar; anything
//! else is rejected before touching the database. A viewport whose southwest
//! longitude exceeds its northeast longitude wraps across the ±180° meridian
//! and the longitude bound becomes a disjunction.

/// A geographic coordinate pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A map viewport bounded by its southwest and northeast corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub sw: LatLng,
    pub ne: LatLng,
}

impl Viewport {
    /// True when the box wraps across the ±180° meridian
    pub fn crosses_antimeridian(&self) -> bool {
        self.sw.lng > self.ne.lng
    }
}

/// Parse a `lat,lng` corner string.
///
/// Grammar per coordinate: optional `-`, one or more digits, optionally a
/// `.` followed by one or more digits. No exponents, no leading dot, no
/// surrounding whitespace. Returns None for anything else.
pub fn parse_lat_lng(s: &str) -> Option<LatLng> {
    let (lat_str, lng_str) = s.split_once(',')?;

    if !is_plain_decimal(lat_str) || !is_plain_decimal(lng_str) {
        return None;
    }

    // The grammar is a strict subset of what f64 parsing accepts
    let lat = lat_str.parse::<f64>().ok()?;
    let lng = lng_str.parse::<f64>().ok()?;

    Some(LatLng { lat, lng })
}

/// Check the strict decimal grammar: `-?digits(.digits)?`
fn is_plain_decimal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }

    match frac_part {
        Some(f) => !f.is_empty() && f.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    }
}
