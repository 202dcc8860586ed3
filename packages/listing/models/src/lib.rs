#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Canonical listing domain types.
//!
//! This crate defines the value types produced by the sheet-ingestion layer
//! and consumed by the map and admin frontends. Everything here is a plain
//! immutable value object: records are rebuilt from scratch on every
//! ingestion pass and never mutated in place.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Latitude band the service area is expected to fall inside (Thailand).
pub const REGION_LAT: RangeInclusive<f64> = 5.0..=21.0;

/// Longitude band the service area is expected to fall inside (Thailand).
pub const REGION_LNG: RangeInclusive<f64> = 97.0..=106.0;

/// A WGS-84 coordinate pair.
///
/// `(0.0, 0.0)` is the "unknown" sentinel: listings without a recoverable
/// location carry it instead of an error, so the frontend can still render
/// the rest of the record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl Coordinate {
    /// The "unknown location" sentinel.
    pub const UNKNOWN: Self = Self { lat: 0.0, lng: 0.0 };

    /// Creates a coordinate from decimal degrees.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether this coordinate carries an actual location (not the sentinel,
    /// both components finite).
    #[must_use]
    pub fn is_known(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && !(self.lat == 0.0 && self.lng == 0.0)
    }

    /// Whether this coordinate falls inside the expected service-region
    /// envelope. Surveying imprecision puts some genuine listings slightly
    /// outside, so callers log rather than reject on `false`.
    #[must_use]
    pub fn in_service_region(&self) -> bool {
        REGION_LAT.contains(&self.lat) && REGION_LNG.contains(&self.lng)
    }
}

/// Thai three-tier land measurement. 1 rai = 4 ngan = 400 square wa.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandArea {
    /// Whole rai.
    pub rai: u32,
    /// Whole ngan (4 per rai).
    pub ngan: u32,
    /// Square wa, fractional (400 per rai).
    pub wa: f64,
}

impl LandArea {
    /// Creates a land area from its three tiers.
    #[must_use]
    pub const fn new(rai: u32, ngan: u32, wa: f64) -> Self {
        Self { rai, ngan, wa }
    }

    /// Total area expressed in rai. Used for price-per-rai computation
    /// only; the tiered form stays the primary representation.
    #[must_use]
    pub fn total_rai(&self) -> f64 {
        f64::from(self.rai) + f64::from(self.ngan) / 4.0 + self.wa / 400.0
    }

    /// Whether all three tiers are zero (area unknown).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rai == 0 && self.ngan == 0 && self.wa == 0.0
    }
}

/// Languages the marketplace publishes listing text in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    /// Thai, the primary language of the source sheet.
    Th,
    /// English.
    En,
}

impl Language {
    /// The language whose text backfills missing translations.
    pub const PRIMARY: Self = Self::Th;

    /// Returns all supported languages.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Th, Self::En]
    }
}

/// A per-language text bundle.
///
/// Construction backfills missing translations so consumers never see an
/// empty string when at least one language was supplied: the primary
/// language fills any blank translation, and a blank primary is filled from
/// the first non-empty translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// Thai text.
    pub th: String,
    /// English text.
    pub en: String,
}

impl LocalizedText {
    /// Builds a bundle from raw per-language cells, applying the backfill
    /// rule.
    #[must_use]
    pub fn from_parts(th: &str, en: &str) -> Self {
        let th = th.trim();
        let en = en.trim();

        let primary = if th.is_empty() { en } else { th };

        Self {
            th: primary.to_string(),
            en: if en.is_empty() { primary } else { en }.to_string(),
        }
    }

    /// Returns the text for the given language.
    #[must_use]
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Th => &self.th,
            Language::En => &self.en,
        }
    }

    /// Whether no language carries any text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.th.is_empty() && self.en.is_empty()
    }
}

/// Canonical listing categories.
///
/// Raw sheet labels are free text; the ingestion layer classifies them into
/// exactly one of these.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyCategory {
    /// Empty or undeveloped land. The default when a label matches nothing.
    #[default]
    Land,
    /// Houses, condominiums, townhomes.
    Residential,
    /// Factories, warehouses.
    Industrial,
    /// Shophouses, offices, retail.
    Commercial,
}

impl PropertyCategory {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Land, Self::Residential, Self::Industrial, Self::Commercial]
    }
}

/// Canonical listing availability states.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyStatus {
    /// Listed and available for sale. The default for unrecognized labels.
    #[default]
    Available,
    /// Offered for rent.
    Rent,
    /// Sale completed.
    Sold,
    /// Deposit taken, sale pending.
    Reserved,
}

impl PropertyStatus {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Available, Self::Rent, Self::Sold, Self::Reserved]
    }
}

/// One marketplace listing, assembled from a single sheet row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Listing identifier. Taken from the sheet when present, otherwise
    /// derived deterministically from row content.
    pub id: String,
    /// Identifier of the zone this listing belongs to (may be empty).
    pub zone_id: String,
    /// Free-form quality grade (e.g. "A", "B+").
    pub grade: String,
    /// Canonical category.
    pub category: PropertyCategory,
    /// Canonical availability status.
    pub status: PropertyStatus,
    /// Listing title.
    pub title: LocalizedText,
    /// Asking price in baht. Zero when the sheet carries none.
    pub price: f64,
    /// Land area in the tiered rai/ngan/wa form.
    pub land_area: LandArea,
    /// `round(price / total_rai)`, or 0 when the area is unknown.
    pub price_per_rai: i64,
    /// Main description.
    pub description: LocalizedText,
    /// Secondary description block.
    pub additional_description: LocalizedText,
    /// Nearby points of interest.
    pub nearby_area: LocalizedText,
    /// Map position, `Coordinate::UNKNOWN` when unrecoverable.
    pub position: Coordinate,
    /// Raw map link as published in the sheet.
    pub map_link: String,
    /// Image URLs in display order: cover, mockup, then numbered slots.
    pub images: Vec<String>,
    /// Video URL (may be empty).
    pub video_url: String,
}

/// A zone grouping listings on the map, derived from the full row set on
/// every ingestion pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Zone identifier as published in the sheet.
    pub id: String,
    /// Display name, captured from the first row introducing the id.
    pub name: String,
    /// Map marker icon name or URL.
    pub icon: String,
    /// Centroid of the member listings' known coordinates, or the fixed
    /// default center when no member has one.
    pub center: Coordinate,
    /// Initial map zoom when focusing this zone.
    pub zoom_level: u8,
}
