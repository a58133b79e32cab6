//! Nearest-marker / nearest-zone resolution for one position report.

use crate::{area, geometry};
use fleet_domain::{Geofence, GeofenceKind, Position};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// One nearby geofence: its name and signed/unsigned distance in meters
/// (signed for markers, unsigned for zones).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityHit {
    pub name: String,
    pub distance: f64,
}

/// Proximity of a position to the geofence collection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proximity {
    pub nearest_marker: Option<ProximityHit>,
    pub nearest_zone: Option<ProximityHit>,
}

/// Find the nearest marker and nearest zone for one position.
///
/// Geofences are evaluated in id order so tie-breaking does not depend on
/// the store's iteration order. Markers parse as circles with signed
/// distance, zones as polygons with nearest-vertex distance; within each
/// partition the smallest absolute distance wins, ties going to the lowest
/// id. Routes and unparsable geofences are skipped.
#[must_use]
pub fn resolve(position: &Position, geofences: &[Geofence]) -> Proximity {
    let point = position.point();

    let mut ordered: Vec<&Geofence> = geofences.iter().collect();
    ordered.sort_by(|a, b| a.id.cmp(&b.id));

    let mut proximity = Proximity::default();
    for fence in ordered {
        match area::resolve_kind(fence) {
            GeofenceKind::Marker => {
                let circle = match area::parse_circle(&fence.area) {
                    Ok(circle) => circle,
                    Err(err) => {
                        trace!(fence = %fence.name, %err, "skipping unparsable marker");
                        continue;
                    }
                };
                let distance = geometry::distance_to_circle(&point, &circle);
                replace_if_nearer(&mut proximity.nearest_marker, &fence.name, distance);
            }
            GeofenceKind::Zone => {
                let polygon = match area::parse_polygon(&fence.area) {
                    Ok(polygon) => polygon,
                    Err(err) => {
                        trace!(fence = %fence.name, %err, "skipping unparsable zone");
                        continue;
                    }
                };
                let distance = geometry::distance_to_polygon(&point, &polygon);
                replace_if_nearer(&mut proximity.nearest_zone, &fence.name, distance);
            }
            GeofenceKind::Route | GeofenceKind::Unknown => {}
        }
    }
    proximity
}

fn replace_if_nearer(slot: &mut Option<ProximityHit>, name: &str, distance: f64) {
    // Strict comparison keeps the first-encountered fence on exact ties.
    let nearer = slot
        .as_ref()
        .is_none_or(|hit| distance.abs() < hit.distance.abs());
    if nearer {
        *slot = Some(ProximityHit {
            name: name.to_string(),
            distance,
        });
    }
}
