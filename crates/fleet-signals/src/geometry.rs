//! Great-circle geometry and distance formatting.
//!
//! All functions are pure and operate on caller-supplied snapshots. Polygon
//! distance is the minimum distance to any *vertex*, not to the nearest
//! edge; that approximation is part of the contract (see crate docs).

use fleet_domain::{Circle, GeoPoint, Polygon};
use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

const METERS_PER_MILE: f64 = 1_609.34;
const METERS_PER_NAUTICAL_MILE: f64 = 1_852.0;
const FEET_PER_METER: f64 = 3.28084;

/// Great-circle distance between two points in meters (haversine formula).
///
/// Symmetric, zero for coincident points, well-defined at all latitudes.
#[must_use]
pub fn distance(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Ray-casting (crossing number) point-in-polygon test.
///
/// The result for a point exactly on an edge is implementation-defined.
/// Degenerate polygons (fewer than 3 vertices) are never "inside".
#[must_use]
pub fn point_in_polygon(p: &GeoPoint, polygon: &Polygon) -> bool {
    let vertices = &polygon.vertices;
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].longitude, vertices[i].latitude);
        let (xj, yj) = (vertices[j].longitude, vertices[j].latitude);
        if ((yi > p.latitude) != (yj > p.latitude))
            && (p.longitude < (xj - xi) * (p.latitude - yi) / (yj - yi) + xi)
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Distance from a point to the nearest polygon *vertex*, in meters.
///
/// Deliberately not point-to-segment distance; always unsigned. Returns
/// infinity for an empty vertex list.
#[must_use]
pub fn distance_to_polygon(p: &GeoPoint, polygon: &Polygon) -> f64 {
    polygon
        .vertices
        .iter()
        .map(|vertex| distance(p, vertex))
        .fold(f64::INFINITY, f64::min)
}

/// Signed distance from a point to a circle boundary, in meters.
///
/// Negative inside, positive outside, zero on the boundary.
#[must_use]
pub fn distance_to_circle(p: &GeoPoint, circle: &Circle) -> f64 {
    distance(p, &circle.center()) - circle.radius_m
}

/// Display unit for formatted distances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    Km,
    Mi,
    Nmi,
}

/// Format a distance in meters for display in the given unit.
///
/// Negative input renders as `"0 m"` (the point is inside the area).
/// Sub-threshold values fall back to a finer unit: feet below 0.1 mi,
/// meters below 0.1 nmi and below 1 km.
#[must_use]
pub fn format_distance(meters: f64, unit: DistanceUnit) -> String {
    if meters < 0.0 {
        return "0 m".to_string();
    }
    match unit {
        DistanceUnit::Mi => {
            let miles = meters / METERS_PER_MILE;
            if miles < 0.1 {
                format!("{:.0} ft", meters * FEET_PER_METER)
            } else {
                format!("{miles:.2} mi")
            }
        }
        DistanceUnit::Nmi => {
            let nautical = meters / METERS_PER_NAUTICAL_MILE;
            if nautical < 0.1 {
                format!("{meters:.0} m")
            } else {
                format!("{nautical:.2} nmi")
            }
        }
        DistanceUnit::Km => {
            if meters < 1000.0 {
                format!("{meters:.0} m")
            } else {
                format!("{:.2} km", meters / 1000.0)
            }
        }
    }
}
