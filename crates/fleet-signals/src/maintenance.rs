//! Maintenance due/overdue evaluation.
//!
//! Counter-based items (`totalDistance`, `hours`) read their current value
//! verbatim from the position attribute bag, with no unit conversion.
//! Calendar items (`fixTime`) measure remaining days until the next due
//! timestamp.

use chrono::{DateTime, Utc};
use fleet_domain::{AlertStatus, MaintenanceAlert, MaintenanceItem, MaintenanceType, Position};
use tracing::debug;

/// Counter items warn when remaining headroom drops below this share of
/// the period.
pub const WARNING_RATIO: f64 = 0.1;

/// Calendar items warn when fewer than this many days remain.
pub const FIX_TIME_WARNING_DAYS: f64 = 7.0;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Evaluate one maintenance item against one position snapshot.
///
/// Returns `None` for incomplete configuration: a missing type, or a
/// missing or non-positive period. That is "nothing to report", not an
/// error.
#[must_use]
pub fn evaluate(
    item: &MaintenanceItem,
    position: &Position,
    now: DateTime<Utc>,
) -> Option<MaintenanceAlert> {
    let maintenance_type = item.maintenance_type?;
    let period = item.period.filter(|p| *p > 0.0)?;

    let (current, remaining) = match maintenance_type {
        MaintenanceType::TotalDistance => {
            let current = position.number_attribute("totalDistance");
            (current, item.start + period - current)
        }
        MaintenanceType::Hours => {
            let current = position.number_attribute("hours");
            (current, item.start + period - current)
        }
        MaintenanceType::FixTime => {
            let now_ms = now.timestamp_millis() as f64;
            let next_due_ms = item.start + period;
            (now_ms, (next_due_ms - now_ms) / MS_PER_DAY)
        }
    };

    let status = if remaining <= 0.0 {
        AlertStatus::Expired
    } else {
        let warning = match maintenance_type {
            MaintenanceType::FixTime => remaining < FIX_TIME_WARNING_DAYS,
            _ => remaining < period * WARNING_RATIO,
        };
        if warning {
            AlertStatus::Warning
        } else {
            AlertStatus::Ok
        }
    };

    let unit = maintenance_type.unit();
    let magnitude = remaining.abs().round() as i64;
    let text = match status {
        AlertStatus::Expired => {
            format!("{}: EXPIRED ({magnitude} {unit} overdue)", item.name)
        }
        AlertStatus::Warning => format!("{}: WARNING ({magnitude} {unit} left)", item.name),
        AlertStatus::Ok => format!("{}: {magnitude} {unit} left", item.name),
    };

    Some(MaintenanceAlert {
        name: item.name.clone(),
        maintenance_type,
        current_value: current,
        remaining_value: remaining,
        unit: unit.to_string(),
        status,
        text,
    })
}

/// Evaluate a set of maintenance items, skipping any that yield nothing.
///
/// Each item is evaluated independently; one incomplete item never affects
/// its siblings.
#[must_use]
pub fn evaluate_all(
    items: &[MaintenanceItem],
    position: &Position,
    now: DateTime<Utc>,
) -> Vec<MaintenanceAlert> {
    items
        .iter()
        .filter_map(|item| {
            let alert = evaluate(item, position, now);
            if alert.is_none() {
                debug!(item = %item.name, "skipping maintenance item with incomplete configuration");
            }
            alert
        })
        .collect()
}
