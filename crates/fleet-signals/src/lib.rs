//! # Fleet Telemetry - Signal Derivation Core
//!
//! Pure functions that turn raw position/geofence/maintenance snapshots
//! into human-meaningful signals: proximity to named areas, a
//! motion/connectivity status classification, and maintenance due/overdue
//! alerts. Inputs are caller-owned read-only snapshots; outputs are
//! transient and safe to recompute at any time.
//!
//! Everything here is synchronous and referentially transparent except the
//! [`status::StatusClassifier`] refresh timer, the crate's single owned
//! resource. There is no fatal error class: malformed records are skipped
//! and logged, missing telemetry folds into "unknown" branches.
//!
//! Known approximation carried on purpose: polygon distance is measured to
//! the nearest *vertex*, not the nearest edge.

pub mod area;
pub mod error;
pub mod geometry;
pub mod maintenance;
pub mod proximity;
pub mod status;

pub use error::{Result, SignalError};
pub use geometry::DistanceUnit;
pub use proximity::{Proximity, ProximityHit};
pub use status::StatusClassifier;
