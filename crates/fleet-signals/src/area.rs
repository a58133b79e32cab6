//! Parser for the WKT-lite area grammar persisted by the geofence store.
//!
//! Three encodings exist: `CIRCLE (<lat> <lon>, <radius>)`,
//! `POLYGON ((<lat> <lon>, <lat> <lon>, ...))` and `LINESTRING (...)`.
//! Linestrings are recognized by prefix only; routes are excluded from
//! proximity computation, so their coordinates are never parsed here.
//! Whitespace around tokens is insignificant.

use crate::error::{Result, SignalError};
use fleet_domain::{Circle, GeoPoint, Geofence, GeofenceKind, Polygon};

const CIRCLE_PREFIX: &str = "CIRCLE";
const POLYGON_PREFIX: &str = "POLYGON";
const LINESTRING_PREFIX: &str = "LINESTRING";

/// Parse a `CIRCLE (<lat> <lon>, <radius>)` encoding.
pub fn parse_circle(text: &str) -> Result<Circle> {
    let body = strip_shape(text, CIRCLE_PREFIX, "(", ")")?;
    let (pair, radius) = body
        .split_once(',')
        .ok_or_else(|| SignalError::Unbalanced(text.to_string()))?;
    let center = parse_pair(pair)?;
    let radius_m: f64 = radius.trim().parse()?;
    if radius_m < 0.0 {
        return Err(SignalError::NegativeRadius(radius_m));
    }
    Ok(Circle {
        latitude: center.latitude,
        longitude: center.longitude,
        radius_m,
    })
}

/// Parse a `POLYGON ((<lat> <lon>, ...))` encoding into an ordered vertex
/// list. Fewer than 3 vertices is rejected.
pub fn parse_polygon(text: &str) -> Result<Polygon> {
    let body = strip_shape(text, POLYGON_PREFIX, "((", "))")?;
    let vertices = body
        .split(',')
        .map(parse_pair)
        .collect::<Result<Vec<GeoPoint>>>()?;
    if vertices.len() < 3 {
        return Err(SignalError::TooFewVertices(vertices.len()));
    }
    Ok(Polygon { vertices })
}

/// Infer the semantic kind of an area from its text prefix.
#[must_use]
pub fn infer_kind(area: &str) -> GeofenceKind {
    let text = area.trim_start();
    if text.starts_with(CIRCLE_PREFIX) {
        GeofenceKind::Marker
    } else if text.starts_with(POLYGON_PREFIX) {
        GeofenceKind::Zone
    } else if text.starts_with(LINESTRING_PREFIX) {
        GeofenceKind::Route
    } else {
        GeofenceKind::Unknown
    }
}

/// Kind of a geofence: the explicit tag when present, otherwise inferred
/// from the area text.
#[must_use]
pub fn resolve_kind(fence: &Geofence) -> GeofenceKind {
    match fence.kind {
        GeofenceKind::Unknown => infer_kind(&fence.area),
        kind => kind,
    }
}

fn strip_shape<'a>(
    text: &'a str,
    prefix: &'static str,
    open: &str,
    close: &str,
) -> Result<&'a str> {
    let body = text
        .trim()
        .strip_prefix(prefix)
        .ok_or_else(|| SignalError::AreaPrefix {
            expected: prefix,
            text: text.to_string(),
        })?
        .trim();
    body.strip_prefix(open)
        .and_then(|inner| inner.strip_suffix(close))
        .map(str::trim)
        .ok_or_else(|| SignalError::Unbalanced(text.to_string()))
}

fn parse_pair(pair: &str) -> Result<GeoPoint> {
    let mut tokens = pair.split_whitespace();
    let (Some(lat), Some(lon), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return Err(SignalError::CoordinatePair(pair.to_string()));
    };
    Ok(GeoPoint::new(lat.parse()?, lon.parse()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_domain::Attributes;
    use uuid::Uuid;

    fn fence(kind: GeofenceKind, area: &str) -> Geofence {
        Geofence {
            id: Uuid::new_v4(),
            name: "fence".to_string(),
            kind,
            area: area.to_string(),
            attributes: Attributes::new(),
        }
    }

    #[test]
    fn test_parse_circle() {
        let circle = parse_circle("CIRCLE (31.6289 65.7372, 150.5)").unwrap();
        assert_eq!(circle.latitude, 31.6289);
        assert_eq!(circle.longitude, 65.7372);
        assert_eq!(circle.radius_m, 150.5);
    }

    #[test]
    fn test_parse_circle_is_whitespace_insensitive() {
        let circle = parse_circle("  CIRCLE(  31.5   65.7 ,  200  )  ").unwrap();
        assert_eq!(circle.latitude, 31.5);
        assert_eq!(circle.radius_m, 200.0);
    }

    #[test]
    fn test_parse_circle_failures() {
        assert!(matches!(
            parse_circle("POLYGON ((1 1, 2 2, 3 3))"),
            Err(SignalError::AreaPrefix { .. })
        ));
        assert!(matches!(
            parse_circle("CIRCLE (31.6 65.7)"),
            Err(SignalError::Unbalanced(_))
        ));
        assert!(matches!(
            parse_circle("CIRCLE (31.6 65.7, -5)"),
            Err(SignalError::NegativeRadius(_))
        ));
        assert!(parse_circle("CIRCLE (north east, 100)").is_err());
    }

    #[test]
    fn test_parse_polygon_preserves_vertex_order() {
        let text = "POLYGON ((1.0 2.0, 3.0 4.0, 5.0 6.0, 7.0 8.0))";
        let polygon = parse_polygon(text).unwrap();
        assert_eq!(polygon.vertices.len(), 4);
        assert_eq!(polygon.vertices[0], GeoPoint::new(1.0, 2.0));
        assert_eq!(polygon.vertices[3], GeoPoint::new(7.0, 8.0));
    }

    #[test]
    fn test_parse_polygon_round_trip_count() {
        let n = 9;
        let pairs: Vec<String> = (0..n).map(|i| format!("{i}.5 {i}.25")).collect();
        let text = format!("POLYGON (({}))", pairs.join(", "));
        let polygon = parse_polygon(&text).unwrap();
        assert_eq!(polygon.vertices.len(), n);
        for (i, vertex) in polygon.vertices.iter().enumerate() {
            assert_eq!(vertex.latitude, i as f64 + 0.5);
            assert_eq!(vertex.longitude, i as f64 + 0.25);
        }
    }

    #[test]
    fn test_parse_polygon_rejects_too_few_vertices() {
        assert!(matches!(
            parse_polygon("POLYGON ((1 1, 2 2))"),
            Err(SignalError::TooFewVertices(2))
        ));
    }

    #[test]
    fn test_parse_polygon_rejects_malformed_pair() {
        assert!(matches!(
            parse_polygon("POLYGON ((1 1, 2, 3 3))"),
            Err(SignalError::CoordinatePair(_))
        ));
        assert!(matches!(
            parse_polygon("POLYGON ((1 1 9, 2 2, 3 3))"),
            Err(SignalError::CoordinatePair(_))
        ));
    }

    #[test]
    fn test_infer_kind() {
        assert_eq!(infer_kind("CIRCLE (1 1, 5)"), GeofenceKind::Marker);
        assert_eq!(infer_kind("POLYGON ((1 1, 2 2, 3 3))"), GeofenceKind::Zone);
        assert_eq!(infer_kind("LINESTRING (1 1, 2 2)"), GeofenceKind::Route);
        assert_eq!(infer_kind("  LINESTRING (1 1, 2 2)"), GeofenceKind::Route);
        assert_eq!(infer_kind("BOX (1 1, 2 2)"), GeofenceKind::Unknown);
        assert_eq!(infer_kind(""), GeofenceKind::Unknown);
    }

    #[test]
    fn test_resolve_kind_prefers_explicit_tag() {
        // Tagged as zone even though the text says circle.
        let tagged = fence(GeofenceKind::Zone, "CIRCLE (1 1, 5)");
        assert_eq!(resolve_kind(&tagged), GeofenceKind::Zone);

        let untagged = fence(GeofenceKind::Unknown, "CIRCLE (1 1, 5)");
        assert_eq!(resolve_kind(&untagged), GeofenceKind::Marker);
    }
}
