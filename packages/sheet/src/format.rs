//! Numeric cell parsing and display formatting.
//!
//! Parsing is lenient: digit grouping is tolerated and anything
//! unparseable becomes zero. Formatting reproduces the display strings the
//! frontend shows; the canonical numeric values stay on the record
//! untouched.

use estate_map_listing_models::LandArea;

/// One million baht, the threshold for the compact price form.
const MILLION: f64 = 1_000_000.0;

/// Parses a numeric cell, tolerating comma digit grouping. Blank,
/// malformed, or non-finite input yields `0.0`.
#[must_use]
pub fn parse_decimal(raw: &str) -> f64 {
    let cleaned = raw.trim().replace(',', "");
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Parses a whole-number cell. Negative or malformed input yields `0`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_whole(raw: &str) -> u32 {
    let value = parse_decimal(raw);
    if value <= 0.0 { 0 } else { value.round() as u32 }
}

/// Display form of a price in baht: `"4.5 ล้าน"` at one million and above,
/// grouped digits below.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_price(price: f64) -> String {
    if price >= MILLION {
        let rendered = format!("{:.2}", price / MILLION);
        let rendered = rendered.trim_end_matches('0').trim_end_matches('.');
        format!("{rendered} ล้าน")
    } else {
        group_digits(price.round() as i64)
    }
}

/// Display form of a tiered land area: `"{value} {unit}"` segments joined
/// by spaces, zero tiers omitted. An all-zero area renders as `"-"`.
#[must_use]
pub fn format_land_area(area: &LandArea) -> String {
    if area.is_empty() {
        return "-".to_string();
    }

    let mut segments = Vec::new();
    if area.rai > 0 {
        segments.push(format!("{} ไร่", area.rai));
    }
    if area.ngan > 0 {
        segments.push(format!("{} งาน", area.ngan));
    }
    if area.wa > 0.0 {
        segments.push(format!("{} ตร.ว.", format_wa(area.wa)));
    }
    segments.join(" ")
}

/// Renders the wa tier without a trailing `.0` for whole values.
#[allow(clippy::cast_possible_truncation)]
fn format_wa(wa: f64) -> String {
    if wa.fract() == 0.0 {
        format!("{}", wa as i64)
    } else {
        format!("{wa}")
    }
}

/// Groups digits in threes: `4500000` → `"4,500,000"`.
fn group_digits(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_grouped_digits() {
        assert!((parse_decimal("4,000,000") - 4_000_000.0).abs() < f64::EPSILON);
        assert!((parse_decimal(" 12.5 ") - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn malformed_decimal_is_zero() {
        assert_eq!(parse_decimal(""), 0.0);
        assert_eq!(parse_decimal("ไม่ระบุ"), 0.0);
        assert_eq!(parse_decimal("NaN"), 0.0);
    }

    #[test]
    fn whole_clamps_negative() {
        assert_eq!(parse_whole("3"), 3);
        assert_eq!(parse_whole("-2"), 0);
        assert_eq!(parse_whole("x"), 0);
    }

    #[test]
    fn compact_price_above_million() {
        assert_eq!(format_price(4_000_000.0), "4 ล้าน");
        assert_eq!(format_price(4_500_000.0), "4.5 ล้าน");
        assert_eq!(format_price(1_250_000.0), "1.25 ล้าน");
    }

    #[test]
    fn grouped_price_below_million() {
        assert_eq!(format_price(950_000.0), "950,000");
        assert_eq!(format_price(0.0), "0");
    }

    #[test]
    fn area_with_all_tiers() {
        assert_eq!(format_land_area(&LandArea::new(1, 2, 50.0)), "1 ไร่ 2 งาน 50 ตร.ว.");
    }

    #[test]
    fn area_omits_zero_tiers() {
        assert_eq!(format_land_area(&LandArea::new(0, 0, 50.0)), "50 ตร.ว.");
        assert_eq!(format_land_area(&LandArea::new(2, 0, 0.0)), "2 ไร่");
    }

    #[test]
    fn area_fractional_wa() {
        assert_eq!(format_land_area(&LandArea::new(0, 0, 50.5)), "50.5 ตร.ว.");
    }

    #[test]
    fn empty_area_is_dash() {
        assert_eq!(format_land_area(&LandArea::default()), "-");
    }
}
