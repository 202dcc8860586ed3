#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Sheet-export ingestion core.
//!
//! The marketplace's listings live in a hand-maintained spreadsheet whose
//! CSV export is fetched by a separate I/O layer. This crate turns that raw
//! text into typed [`Property`] and [`Zone`] records.
//!
//! The whole pipeline is pure, synchronous, and infallible by design:
//! inconsistent cells degrade to documented defaults instead of failing,
//! because a half-filled row that renders beats a sheet that doesn't.
//! Data-quality oddities (e.g. coordinates far outside the service region)
//! are logged, never fatal.

pub mod cache;
pub mod coords;
pub mod csv;
pub mod drive;
pub mod fields;
pub mod format;
pub mod transform;
pub mod type_mapping;
pub mod zone;

use estate_map_listing_models::{Property, Zone};
use serde::Serialize;

/// Everything derived from one sheet export.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetData {
    /// One listing per data row, in sheet order.
    pub properties: Vec<Property>,
    /// Zones in order of first appearance.
    pub zones: Vec<Zone>,
}

/// Runs the full transformation over a raw CSV export.
#[must_use]
pub fn parse_sheet(text: &str) -> SheetData {
    let rows = csv::parse_csv(text);
    let properties = transform::transform_properties(&rows);
    let zones = zone::aggregate_zones(&rows);

    log::debug!(
        "transformed {} rows into {} listings across {} zones",
        rows.len(),
        properties.len(),
        zones.len()
    );

    SheetData { properties, zones }
}

#[cfg(test)]
mod tests {
    use estate_map_listing_models::{PropertyCategory, PropertyStatus};

    use super::*;

    const EXPORT: &str = "\
ID,Zone,Zone Name,Icon,Category,Status,Title TH,Title EN,Price,Rai,Ngan,Wa,Latitude,Longitude,Map Link,Cover,Image 2
P-001,A,หาดจอมเทียน,beach,ที่ดินเปล่า,ว่าง,แปลงติดทะเล,Beachfront,4000000,1,0,0,12.95,100.98,,https://cdn.example.com/a.jpg,
P-002,A,ignored,ignored,บ้านเดี่ยว,ขายแล้ว,บ้านสองชั้น,,8000000,0,2,0,12.97,100.96,,,
P-003,B,เขาพระตำหนัก,hill,โกดัง,ให้เช่า,โกดังให้เช่า,,120000,0,0,0,,,\"https://maps.google.com/@12.92,100.87,15z\",,
";

    #[test]
    fn end_to_end_small_export() {
        let data = parse_sheet(EXPORT);
        assert_eq!(data.properties.len(), 3);
        assert_eq!(data.zones.len(), 2);

        let first = &data.properties[0];
        assert_eq!(first.id, "P-001");
        assert_eq!(first.category, PropertyCategory::Land);
        assert_eq!(first.price_per_rai, 4_000_000);
        assert_eq!(first.images, vec!["https://cdn.example.com/a.jpg"]);

        let second = &data.properties[1];
        assert_eq!(second.category, PropertyCategory::Residential);
        assert_eq!(second.status, PropertyStatus::Sold);
        // Thai title backfills the missing English one.
        assert_eq!(second.title.en, "บ้านสองชั้น");

        let third = &data.properties[2];
        assert_eq!(third.status, PropertyStatus::Rent);
        assert!((third.position.lat - 12.92).abs() < 1e-9);
    }

    #[test]
    fn zones_keep_introducing_identity_and_average_members() {
        let data = parse_sheet(EXPORT);

        let zone_a = &data.zones[0];
        assert_eq!(zone_a.id, "A");
        assert_eq!(zone_a.name, "หาดจอมเทียน");
        assert_eq!(zone_a.icon, "beach");
        assert!((zone_a.center.lat - 12.96).abs() < 1e-9);
        assert!((zone_a.center.lng - 100.97).abs() < 1e-9);

        let zone_b = &data.zones[1];
        assert_eq!(zone_b.id, "B");
        assert!((zone_b.center.lat - 12.92).abs() < 1e-9);
    }

    #[test]
    fn empty_export_yields_empty_data() {
        assert_eq!(parse_sheet(""), SheetData::default());
        assert_eq!(parse_sheet("ID,Zone\n"), SheetData::default());
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(parse_sheet(EXPORT)).unwrap();
        let first = &json["properties"][0];
        assert!(first.get("pricePerRai").is_some());
        assert!(first.get("zoneId").is_some());
        assert_eq!(json["zones"][0]["zoomLevel"], 12);
    }
}
