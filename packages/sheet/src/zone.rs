//! Zone derivation over the full row set.
//!
//! Zones are not stored anywhere: every ingestion pass rebuilds them from
//! the listings sharing a zone id. Two passes: the first accumulates each
//! zone's declared identity and its members' known coordinates, the second
//! finalizes centers once membership is complete.

use std::collections::BTreeMap;

use estate_map_listing_models::{Coordinate, Zone};

use crate::coords;
use crate::csv::RawRow;
use crate::fields;

/// Fallback map center for zones with no locatable members (Bang Lamung
/// district, the middle of the service area).
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(12.9236, 100.8825);

/// Focus zoom for zones without a row-level override.
pub const DEFAULT_ZOOM: u8 = 12;

/// A zone being accumulated during the first pass.
struct ZoneDraft {
    id: String,
    name: String,
    icon: String,
    zoom: Option<u8>,
    coordinates: Vec<Coordinate>,
}

/// Derives zones from the full row set, ordered by first appearance of
/// their id.
///
/// Name and icon are captured from the first row introducing the id; later
/// rows never overwrite them. Every member row contributes its coordinate
/// when known. Rows without a zone id contribute nothing.
#[must_use]
pub fn aggregate_zones(rows: &[RawRow]) -> Vec<Zone> {
    let mut drafts: Vec<ZoneDraft> = Vec::new();
    let mut index: BTreeMap<String, usize> = BTreeMap::new();

    for row in rows {
        let id = row.first_of(fields::ZONE_ID);
        if id.is_empty() {
            continue;
        }

        let slot = *index.entry(id.to_string()).or_insert_with(|| {
            drafts.push(ZoneDraft {
                id: id.to_string(),
                name: row.first_of(fields::ZONE_NAME).to_string(),
                icon: row.first_of(fields::ZONE_ICON).to_string(),
                zoom: None,
                coordinates: Vec::new(),
            });
            drafts.len() - 1
        });

        let draft = &mut drafts[slot];
        if draft.zoom.is_none()
            && let Ok(zoom) = row.first_of(fields::ZOOM).parse::<u8>()
        {
            draft.zoom = Some(zoom);
        }

        let position = coords::extract_coordinates(row);
        if position.is_known() {
            draft.coordinates.push(position);
        }
    }

    drafts.into_iter().map(finalize).collect()
}

/// Second pass: centroid of the accumulated coordinates, or the fixed
/// default center for zones whose members have none.
fn finalize(draft: ZoneDraft) -> Zone {
    let center = centroid(&draft.coordinates).unwrap_or_else(|| {
        log::debug!("zone {} has no locatable members, using default center", draft.id);
        DEFAULT_CENTER
    });

    Zone {
        id: draft.id,
        name: draft.name,
        icon: draft.icon,
        center,
        zoom_level: draft.zoom.unwrap_or(DEFAULT_ZOOM),
    }
}

/// Arithmetic mean of a coordinate list.
#[allow(clippy::cast_precision_loss)]
fn centroid(coordinates: &[Coordinate]) -> Option<Coordinate> {
    if coordinates.is_empty() {
        return None;
    }

    let count = coordinates.len() as f64;
    let lat = coordinates.iter().map(|c| c.lat).sum::<f64>() / count;
    let lng = coordinates.iter().map(|c| c.lng).sum::<f64>() / count;
    Some(Coordinate::new(lat, lng))
}
