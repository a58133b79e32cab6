//! # Fleet Telemetry - Domain Model
//!
//! Value objects, entity snapshots, and derived-signal types for the fleet
//! monitoring telemetry core. These types are the single source of truth
//! across all layers: stores, derivation, and presentation.
//!
//! Entities (`Device`, `Position`, `Geofence`, `MaintenanceItem`) are owned
//! and mutated by external stores; this crate only models read-only
//! snapshots of them. Derived types (`DeviceStatus`, `MaintenanceAlert`)
//! are transient: recomputed from a single snapshot plus wall-clock time,
//! never persisted, safe to discard at any point.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Untyped attribute bag carried by telemetry and configuration records.
pub type Attributes = serde_json::Map<String, Value>;

// =============================================================================
// VALUE OBJECTS
// =============================================================================

/// Geographic point in WGS84 degrees. No altitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Circular area: center point plus radius in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: f64,
}

impl Circle {
    #[must_use]
    pub const fn center(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Polygonal area as an ordered vertex list. Meaningful only with at least
/// 3 vertices; not explicitly closed (last vertex need not repeat the first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<GeoPoint>,
}

// =============================================================================
// ENUMS
// =============================================================================

/// Semantic classification of a geofence shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeofenceKind {
    /// Point of interest, encoded as a circle.
    Marker,
    /// Closed area, encoded as a polygon.
    Zone,
    /// Path, encoded as a linestring.
    Route,
    /// Not tagged and not inferrable from the area text.
    Unknown,
}

impl GeofenceKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Marker => "marker",
            Self::Zone => "zone",
            Self::Route => "route",
            Self::Unknown => "unknown",
        }
    }
}

/// Motion/connectivity classification of a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusKind {
    /// No telemetry within the connectivity timeout.
    Offline,
    /// Reporting in time but the fix is not valid.
    NoGps,
    Moving,
    /// Stationary with ignition on.
    Idle,
    Stopped,
    Unknown,
}

impl StatusKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Offline => "offline",
            Self::NoGps => "noGps",
            Self::Moving => "moving",
            Self::Idle => "idle",
            Self::Stopped => "stopped",
            Self::Unknown => "unknown",
        }
    }
}

/// Presentation color token attached to a device status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Neutral,
    Red,
    Orange,
    Green,
    Amber,
    Grey,
}

impl ColorToken {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Green => "green",
            Self::Amber => "amber",
            Self::Grey => "grey",
        }
    }
}

/// Which telemetry counter a maintenance item tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MaintenanceType {
    /// Odometer reading from `attributes.totalDistance`.
    TotalDistance,
    /// Engine hours from `attributes.hours`.
    Hours,
    /// Calendar schedule keyed on position fix time; start and period are
    /// epoch milliseconds / duration in milliseconds.
    FixTime,
}

impl MaintenanceType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TotalDistance => "totalDistance",
            Self::Hours => "hours",
            Self::FixTime => "fixTime",
        }
    }

    /// Unit label shown for remaining headroom of this type.
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::TotalDistance => "km",
            Self::Hours => "h",
            Self::FixTime => "days",
        }
    }
}

/// Maintenance headroom classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Ok,
    Warning,
    Expired,
}

impl AlertStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Expired => "expired",
        }
    }
}

// =============================================================================
// ENTITY SNAPSHOTS
// =============================================================================

/// Tracked device, as supplied by the device store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: Uuid,
    pub name: String,
    pub unique_id: String,
    pub category: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
}

/// Position report, as supplied by the telemetry store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: Uuid,
    pub device_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    /// Ground speed in km/h.
    pub speed: f64,
    /// Course over ground in degrees.
    pub course: f64,
    /// Altitude in meters.
    pub altitude: f64,
    /// Whether the GPS fix is valid.
    pub valid: bool,
    /// When the device recorded the fix.
    pub fix_time: DateTime<Utc>,
    /// When the backend received the report.
    pub server_time: DateTime<Utc>,
    #[serde(default)]
    pub attributes: Attributes,
}

impl Position {
    /// Location of this report as a point.
    #[must_use]
    pub const fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Numeric attribute lookup; absent or non-numeric values read as 0.
    #[must_use]
    pub fn number_attribute(&self, key: &str) -> f64 {
        self.attributes
            .get(key)
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }

    /// Tri-state ignition attribute: on, off, or not reported.
    #[must_use]
    pub fn ignition(&self) -> Option<bool> {
        self.attributes.get("ignition").and_then(Value::as_bool)
    }
}

/// Named area, as supplied by the geofence store. The `area` field carries
/// the persisted WKT-lite text (`CIRCLE (...)`, `POLYGON ((...))`,
/// `LINESTRING (...)`); this crate never produces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Geofence {
    pub id: Uuid,
    pub name: String,
    pub kind: GeofenceKind,
    #[serde(rename = "areaText")]
    pub area: String,
    #[serde(default)]
    pub attributes: Attributes,
}

/// Maintenance schedule definition, as supplied by the maintenance
/// configuration store. For `FixTime` items `start` is an epoch-millisecond
/// timestamp and `period` a duration in milliseconds; otherwise both are in
/// the counter's own unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceItem {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub maintenance_type: Option<MaintenanceType>,
    #[serde(rename = "startValue")]
    pub start: f64,
    #[serde(rename = "periodValue")]
    pub period: Option<f64>,
}

// =============================================================================
// DERIVED SIGNALS
// =============================================================================

/// Transient device status. Recomputed from one position snapshot plus
/// wall-clock time; holds no history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStatus {
    pub kind: StatusKind,
    pub elapsed_seconds: u64,
    pub text: String,
    pub color: ColorToken,
}

/// Transient maintenance alert for one item against one position snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceAlert {
    pub name: String,
    #[serde(rename = "type")]
    pub maintenance_type: MaintenanceType,
    pub current_value: f64,
    pub remaining_value: f64,
    pub unit: String,
    pub status: AlertStatus,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn position_with(attributes: Attributes) -> Position {
        Position {
            id: Uuid::new_v4(),
            device_id: Uuid::new_v4(),
            latitude: 31.6289,
            longitude: 65.7372,
            speed: 0.0,
            course: 0.0,
            altitude: 0.0,
            valid: true,
            fix_time: Utc::now(),
            server_time: Utc::now(),
            attributes,
        }
    }

    #[test]
    fn test_number_attribute_defaults_to_zero() {
        let position = position_with(Attributes::new());
        assert_eq!(position.number_attribute("totalDistance"), 0.0);

        let mut attributes = Attributes::new();
        attributes.insert("totalDistance".to_string(), json!(1234.5));
        let position = position_with(attributes);
        assert_eq!(position.number_attribute("totalDistance"), 1234.5);
    }

    #[test]
    fn test_ignition_is_tri_state() {
        let position = position_with(Attributes::new());
        assert_eq!(position.ignition(), None);

        let mut attributes = Attributes::new();
        attributes.insert("ignition".to_string(), json!(true));
        assert_eq!(position_with(attributes).ignition(), Some(true));

        let mut attributes = Attributes::new();
        attributes.insert("ignition".to_string(), json!(false));
        assert_eq!(position_with(attributes).ignition(), Some(false));

        // Non-boolean values read as "not reported".
        let mut attributes = Attributes::new();
        attributes.insert("ignition".to_string(), json!("on"));
        assert_eq!(position_with(attributes).ignition(), None);
    }

    #[test]
    fn test_geofence_serde_wire_names() {
        let fence = Geofence {
            id: Uuid::new_v4(),
            name: "Depot".to_string(),
            kind: GeofenceKind::Marker,
            area: "CIRCLE (31.6 65.7, 100)".to_string(),
            attributes: Attributes::new(),
        };
        let value = serde_json::to_value(&fence).unwrap();
        assert_eq!(value["areaText"], json!("CIRCLE (31.6 65.7, 100)"));
        assert_eq!(value["kind"], json!("marker"));
    }

    #[test]
    fn test_maintenance_type_units() {
        assert_eq!(MaintenanceType::TotalDistance.unit(), "km");
        assert_eq!(MaintenanceType::Hours.unit(), "h");
        assert_eq!(MaintenanceType::FixTime.unit(), "days");
    }
}
