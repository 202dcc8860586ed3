//! Row-to-listing assembly.
//!
//! One [`Property`] per sheet row, never failing: missing or malformed
//! cells degrade to defaults so a half-filled row still renders.

use estate_map_listing_models::{Coordinate, LandArea, Language, LocalizedText, Property};
use sha2::{Digest, Sha256};

use crate::coords;
use crate::csv::RawRow;
use crate::drive;
use crate::fields;
use crate::format;
use crate::type_mapping;

/// Supplementary image columns run from slot 2 through 9.
const IMAGE_SLOTS: std::ops::RangeInclusive<u8> = 2..=9;

/// Transforms every row into a listing, in sheet order.
#[must_use]
pub fn transform_properties(rows: &[RawRow]) -> Vec<Property> {
    rows.iter().map(transform_property).collect()
}

/// Assembles one listing from a sheet row.
#[must_use]
pub fn transform_property(row: &RawRow) -> Property {
    let position = coords::extract_coordinates(row);
    let zone_id = row.first_of(fields::ZONE_ID).to_string();
    let title = LocalizedText::from_parts(
        row.first_of(fields::TITLE_TH),
        row.first_of(fields::TITLE_EN),
    );
    let price = format::parse_decimal(row.first_of(fields::PRICE));
    let land_area = LandArea::new(
        format::parse_whole(row.first_of(fields::RAI)),
        format::parse_whole(row.first_of(fields::NGAN)),
        format::parse_decimal(row.first_of(fields::WA)).max(0.0),
    );

    Property {
        id: property_id(row, &title, &zone_id, position),
        zone_id,
        grade: row.first_of(fields::GRADE).to_string(),
        category: type_mapping::map_category(row.first_of(fields::CATEGORY)),
        status: type_mapping::map_status(row.first_of(fields::STATUS)),
        price,
        price_per_rai: price_per_rai(price, &land_area),
        land_area,
        title,
        description: LocalizedText::from_parts(
            row.first_of(fields::DESCRIPTION_TH),
            row.first_of(fields::DESCRIPTION_EN),
        ),
        additional_description: LocalizedText::from_parts(
            row.first_of(fields::EXTRA_DESCRIPTION_TH),
            row.first_of(fields::EXTRA_DESCRIPTION_EN),
        ),
        nearby_area: LocalizedText::from_parts(
            row.first_of(fields::NEARBY_TH),
            row.first_of(fields::NEARBY_EN),
        ),
        position,
        map_link: row.first_of(fields::MAP_LINK).to_string(),
        images: collect_images(row),
        video_url: row.first_of(fields::VIDEO_URL).to_string(),
    }
}

/// `round(price / total_rai)`, guarding the unknown-area case.
#[allow(clippy::cast_possible_truncation)]
fn price_per_rai(price: f64, area: &LandArea) -> i64 {
    let total = area.total_rai();
    if total > 0.0 {
        (price / total).round() as i64
    } else {
        0
    }
}

/// Collects image URLs in display order: cover, mockup, then numbered
/// slots 2-9 ascending. Empty slots are skipped without leaving gaps, and
/// every URL goes through the Drive share-link rewrite.
fn collect_images(row: &RawRow) -> Vec<String> {
    let mut images = Vec::new();

    for candidates in [fields::COVER_IMAGE, fields::MOCKUP_IMAGE] {
        let url = row.first_of(candidates);
        if !url.is_empty() {
            images.push(drive::direct_image_url(url));
        }
    }

    for slot in IMAGE_SLOTS {
        let url = row.first_of(&fields::image_slot(slot));
        if !url.is_empty() {
            images.push(drive::direct_image_url(url));
        }
    }

    images
}

/// Listing identity: the sheet id when present, otherwise a token derived
/// from stable row content (primary title, zone, position) so the listing
/// keeps the same identity across ingestion passes.
fn property_id(row: &RawRow, title: &LocalizedText, zone_id: &str, position: Coordinate) -> String {
    let explicit = row.first_of(fields::ID);
    if !explicit.is_empty() {
        return explicit.to_string();
    }

    let mut hasher = Sha256::new();
    hasher.update(title.get(Language::PRIMARY).as_bytes());
    hasher.update([0]);
    hasher.update(zone_id.as_bytes());
    hasher.update([0]);
    hasher.update(format!("{:.6},{:.6}", position.lat, position.lng).as_bytes());

    let digest = hex::encode(hasher.finalize());
    format!("row-{}", &digest[..12])
}
