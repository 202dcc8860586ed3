//! Coordinate recovery for listings.
//!
//! The sheet rarely carries clean numeric coordinates. Rows arrive with:
//! - explicit `Latitude`/`Longitude` columns (sometimes zeroed),
//! - a pasted map URL with the position embedded in any of half a dozen
//!   shapes (`@lat,lng`, `!3d..!4d..`, `q=`/`ll=`/`sll=` parameters),
//! - a bare `lat,lng` string,
//! - Degrees-Minutes-Seconds notation, often URL-encoded.
//!
//! Extraction tries the numeric columns first, then runs the map-link field
//! through an ordered list of matchers, first match wins. The order is a
//! deliberate tie-break: a single URL can satisfy several patterns, and the
//! leading `@lat,lng` marker is the authoritative one.
//!
//! Nothing here fails: an unrecognizable row yields
//! [`Coordinate::UNKNOWN`], and positions outside the service region are
//! returned as-is with a warning logged for data triage.

use std::sync::LazyLock;

use estate_map_listing_models::Coordinate;
use regex::Regex;

use crate::csv::RawRow;
use crate::fields;
use crate::format::parse_decimal;

/// `@lat,lng` marker segment in a map URL.
static AT_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@(-?\d{1,3}(?:\.\d+)?),\s*(-?\d{1,3}(?:\.\d+)?)").expect("valid regex")
});

/// `!3d{lat}!4d{lng}` embedded data tokens.
static DATA_TOKENS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!3d(-?\d{1,3}(?:\.\d+)?)!4d(-?\d{1,3}(?:\.\d+)?)").expect("valid regex")
});

/// `?q=lat,lng` / `&q=lat,lng` query parameter.
static Q_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[?&]q=(-?\d{1,3}(?:\.\d+)?)\s*,\s*(-?\d{1,3}(?:\.\d+)?)").expect("valid regex")
});

/// `/maps/@lat,lng` path segment.
static MAPS_PATH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/maps/@(-?\d{1,3}(?:\.\d+)?),\s*(-?\d{1,3}(?:\.\d+)?)").expect("valid regex")
});

/// `?ll=lat,lng` query parameter.
static LL_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[?&]ll=(-?\d{1,3}(?:\.\d+)?)\s*,\s*(-?\d{1,3}(?:\.\d+)?)").expect("valid regex")
});

/// `?sll=lat,lng` query parameter.
static SLL_PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[?&]sll=(-?\d{1,3}(?:\.\d+)?)\s*,\s*(-?\d{1,3}(?:\.\d+)?)").expect("valid regex")
});

/// A bare `lat,lng` pair with nothing else in the field.
static BARE_PAIR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(-?\d{1,3}(?:\.\d+)?)\s*,\s*(-?\d{1,3}(?:\.\d+)?)\s*$").expect("valid regex")
});

/// Degrees-Minutes-Seconds notation, e.g. `12°57'02.7"N 100°59'00.9"E`.
static DMS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(\d{1,3})\s*°\s*(\d{1,2})\s*['′]\s*([\d.]+)\s*["″]\s*([NSns])[\s,+]+(\d{1,3})\s*°\s*(\d{1,2})\s*['′]\s*([\d.]+)\s*["″]\s*([EWew])"#,
    )
    .expect("valid regex")
});

/// `!8m2!3d{lat}!4d{lng}` alternate embedded tokens.
static TOKENS_8M2_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!8m2!3d(-?\d{1,3}(?:\.\d+)?)!4d(-?\d{1,3}(?:\.\d+)?)").expect("valid regex")
});

type LinkMatcher = fn(&str) -> Option<Coordinate>;

/// Map-link matchers in priority order. Earlier entries win: a URL carrying
/// both an `@lat,lng` marker and `!3d..!4d..` tokens must resolve through
/// the marker.
const LINK_MATCHERS: &[(&str, LinkMatcher)] = &[
    ("at-marker", match_at_marker),
    ("data-tokens", match_data_tokens),
    ("q-param", match_q_param),
    ("maps-path", match_maps_path),
    ("ll-param", match_ll_param),
    ("sll-param", match_sll_param),
    ("bare-pair", match_bare_pair),
    ("dms", match_dms),
    ("8m2-tokens", match_tokens_8m2),
];

/// Recovers a listing's position from its row.
///
/// Explicit numeric columns win when both are present and non-zero;
/// otherwise the map-link field is run through [`parse_map_link`]. Returns
/// [`Coordinate::UNKNOWN`] when nothing is recognized.
#[must_use]
pub fn extract_coordinates(row: &RawRow) -> Coordinate {
    let lat = parse_decimal(row.first_of(fields::LATITUDE));
    let lng = parse_decimal(row.first_of(fields::LONGITUDE));
    if lat != 0.0 && lng != 0.0 {
        return flag_out_of_region(Coordinate::new(lat, lng));
    }

    let link = row.first_of(fields::MAP_LINK);
    if link.is_empty() {
        return Coordinate::UNKNOWN;
    }

    parse_map_link(link).map_or(Coordinate::UNKNOWN, flag_out_of_region)
}

/// Runs a free-text map link through the matcher list, first match wins.
#[must_use]
pub fn parse_map_link(link: &str) -> Option<Coordinate> {
    for (name, matcher) in LINK_MATCHERS {
        if let Some(position) = matcher(link) {
            log::trace!(
                "map link matched {name}: ({}, {})",
                position.lat,
                position.lng
            );
            return Some(position);
        }
    }
    None
}

/// Warns (but keeps) positions outside the service-region envelope.
/// Hand-surveyed pins drift, so these are triage signals, not rejects.
fn flag_out_of_region(position: Coordinate) -> Coordinate {
    if position.is_known() && !position.in_service_region() {
        log::warn!(
            "coordinate ({}, {}) falls outside the service region",
            position.lat,
            position.lng
        );
    }
    position
}

/// Pulls the two capture groups of `re` out of `text` as a coordinate.
fn capture_pair(re: &Regex, text: &str) -> Option<Coordinate> {
    let caps = re.captures(text)?;
    let lat = caps[1].parse::<f64>().ok()?;
    let lng = caps[2].parse::<f64>().ok()?;
    Some(Coordinate::new(lat, lng))
}

fn match_at_marker(link: &str) -> Option<Coordinate> {
    capture_pair(&AT_MARKER_RE, link)
}

fn match_data_tokens(link: &str) -> Option<Coordinate> {
    capture_pair(&DATA_TOKENS_RE, link)
}

fn match_q_param(link: &str) -> Option<Coordinate> {
    capture_pair(&Q_PARAM_RE, link)
}

fn match_maps_path(link: &str) -> Option<Coordinate> {
    capture_pair(&MAPS_PATH_RE, link)
}

fn match_ll_param(link: &str) -> Option<Coordinate> {
    capture_pair(&LL_PARAM_RE, link)
}

fn match_sll_param(link: &str) -> Option<Coordinate> {
    capture_pair(&SLL_PARAM_RE, link)
}

fn match_bare_pair(link: &str) -> Option<Coordinate> {
    capture_pair(&BARE_PAIR_RE, link)
}

fn match_tokens_8m2(link: &str) -> Option<Coordinate> {
    capture_pair(&TOKENS_8M2_RE, link)
}

/// Matches DMS notation after URL-decoding, since pasted links arrive with
/// the `°`/`'`/`"` marks percent-encoded.
fn match_dms(link: &str) -> Option<Coordinate> {
    let decoded = urlencoding::decode(link).map_or_else(|_| link.to_string(), |c| c.into_owned());
    let caps = DMS_RE.captures(&decoded)?;

    let lat = dms_to_decimal(&caps[1], &caps[2], &caps[3], &caps[4])?;
    let lng = dms_to_decimal(&caps[5], &caps[6], &caps[7], &caps[8])?;
    Some(Coordinate::new(lat, lng))
}

/// `deg + min/60 + sec/3600`, negated for southern/western hemispheres.
fn dms_to_decimal(deg: &str, min: &str, sec: &str, hemisphere: &str) -> Option<f64> {
    let deg = deg.parse::<f64>().ok()?;
    let min = min.parse::<f64>().ok()?;
    let sec = sec.parse::<f64>().ok()?;

    let value = deg + min / 60.0 + sec / 3600.0;
    match hemisphere {
        "S" | "s" | "W" | "w" => Some(-value),
        _ => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Coordinate, lat: f64, lng: f64) {
        assert!(
            (actual.lat - lat).abs() < 1e-3 && (actual.lng - lng).abs() < 1e-3,
            "expected ({lat}, {lng}), got ({}, {})",
            actual.lat,
            actual.lng
        );
    }

    #[test]
    fn numeric_columns_win() {
        let row = RawRow::from_pairs(&[
            ("Latitude", "13.1"),
            ("Longitude", "100.2"),
            ("Map Link", "https://maps.google.com/@12.9,100.9,17z"),
        ]);
        assert_close(extract_coordinates(&row), 13.1, 100.2);
    }

    #[test]
    fn zeroed_numeric_column_falls_back_to_link() {
        let row = RawRow::from_pairs(&[
            ("Latitude", "0"),
            ("Longitude", "100.2"),
            ("Map Link", "https://maps.google.com/@12.9,100.9,17z"),
        ]);
        assert_close(extract_coordinates(&row), 12.9, 100.9);
    }

    #[test]
    fn thai_header_synonyms() {
        let row = RawRow::from_pairs(&[("ละติจูด", "12.95"), ("ลองจิจูด", "100.98")]);
        assert_close(extract_coordinates(&row), 12.95, 100.98);
    }

    #[test]
    fn nothing_recognized_is_sentinel() {
        let row = RawRow::from_pairs(&[("Map Link", "https://example.com/nothing-here")]);
        assert_eq!(extract_coordinates(&row), Coordinate::UNKNOWN);
        assert_eq!(extract_coordinates(&RawRow::default()), Coordinate::UNKNOWN);
    }

    #[test]
    fn at_marker() {
        let link = "https://www.google.com/maps/place/x/@12.9508,100.9836,17z/data=!3m1";
        assert_close(parse_map_link(link).unwrap(), 12.9508, 100.9836);
    }

    #[test]
    fn at_marker_wins_over_data_tokens() {
        let link = "https://maps.google.com/maps/@12.95,100.98,17z/data=!3d12.96!4d100.99";
        assert_close(parse_map_link(link).unwrap(), 12.95, 100.98);
    }

    #[test]
    fn data_tokens() {
        let link = "https://maps.google.com/?foo=1!3d12.96!4d100.99";
        assert_close(parse_map_link(link).unwrap(), 12.96, 100.99);
    }

    #[test]
    fn q_param() {
        assert_close(
            parse_map_link("https://maps.google.com/?q=12.95,100.98").unwrap(),
            12.95,
            100.98,
        );
        assert_close(
            parse_map_link("https://maps.google.com/?z=17&q=12.95,100.98").unwrap(),
            12.95,
            100.98,
        );
    }

    #[test]
    fn ll_and_sll_params() {
        assert_close(
            parse_map_link("https://maps.google.com/?ll=12.95,100.98").unwrap(),
            12.95,
            100.98,
        );
        assert_close(
            parse_map_link("https://maps.google.com/?sll=12.95,100.98").unwrap(),
            12.95,
            100.98,
        );
    }

    #[test]
    fn bare_pair() {
        assert_close(parse_map_link("12.95, 100.98").unwrap(), 12.95, 100.98);
        assert!(parse_map_link("12.95, 100.98 somewhere").is_none());
    }

    #[test]
    fn dms_notation() {
        let link = "12°57'02.7\"N 100°59'00.9\"E";
        assert_close(parse_map_link(link).unwrap(), 12.9508, 100.9836);
    }

    #[test]
    fn dms_southern_western_hemispheres() {
        let link = "12°57'02.7\"S 100°59'00.9\"W";
        assert_close(parse_map_link(link).unwrap(), -12.9508, -100.9836);
    }

    #[test]
    fn dms_url_encoded() {
        let link = "https://www.google.com/maps/place/12%C2%B057'02.7%22N+100%C2%B059'00.9%22E";
        let Some(position) = parse_map_link(link) else {
            panic!("encoded DMS should parse");
        };
        assert_close(position, 12.9508, 100.9836);
    }

    #[test]
    fn tokens_8m2() {
        let link = "https://maps.google.com/x!8m2!3d12.96!4d100.99";
        assert_close(parse_map_link(link).unwrap(), 12.96, 100.99);
    }

    #[test]
    fn out_of_region_value_kept() {
        let row = RawRow::from_pairs(&[("Latitude", "51.5"), ("Longitude", "-0.12")]);
        assert_close(extract_coordinates(&row), 51.5, -0.12);
    }
}
