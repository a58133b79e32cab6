//! Motion/connectivity status classification.
//!
//! Classification is a pure function of one device/position snapshot plus
//! wall-clock time; nothing is stored between calls. The classifier also
//! owns the one non-pure resource in this crate: a 60-second refresh timer
//! that lets consumers re-render elapsed-time text without new telemetry.

use chrono::{DateTime, Utc};
use fleet_domain::{ColorToken, Device, DeviceStatus, Position, StatusKind};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Connectivity timeout applied when none is configured, in seconds.
pub const DEFAULT_TIMEOUT_SECS: i64 = 600;

/// Speed above which a device counts as moving, in km/h.
pub const SPEED_THRESHOLD_KMH: f64 = 5.0;

/// How often the refresh timer fires.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Format an elapsed duration as at most two units, largest first.
///
/// Negative input renders as `"0m"`. Days appear when non-zero; hours when
/// non-zero or a day is shown; minutes when non-zero or nothing larger is.
#[must_use]
pub fn format_duration(seconds: i64) -> String {
    if seconds < 0 {
        return "0m".to_string();
    }
    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;

    let mut parts = Vec::with_capacity(3);
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if hours > 0 || days > 0 {
        parts.push(format!("{hours}h"));
    }
    if minutes > 0 || (hours == 0 && days == 0) {
        parts.push(format!("{minutes}m"));
    }
    parts.truncate(2);
    if parts.is_empty() {
        "0m".to_string()
    } else {
        parts.join(" ")
    }
}

/// Classifies device motion/connectivity state and owns the periodic
/// refresh task.
///
/// The timer is a scoped resource: `start` when observation of a device
/// begins, `stop` on every exit path. Dropping the classifier stops the
/// timer as well.
#[derive(Debug)]
pub struct StatusClassifier {
    timeout_secs: i64,
    refresh: Option<JoinHandle<()>>,
}

impl StatusClassifier {
    /// Classifier with a specific connectivity timeout in seconds.
    #[must_use]
    pub const fn new(timeout_secs: i64) -> Self {
        Self {
            timeout_secs,
            refresh: None,
        }
    }

    /// Classify against the current wall clock.
    #[must_use]
    pub fn classify(&self, device: Option<&Device>, position: Option<&Position>) -> DeviceStatus {
        self.classify_at(device, position, Utc::now())
    }

    /// Classify against an explicit "now". Pure; the `classify` wrapper
    /// supplies the wall clock.
    #[must_use]
    pub fn classify_at(
        &self,
        device: Option<&Device>,
        position: Option<&Position>,
        now: DateTime<Utc>,
    ) -> DeviceStatus {
        let (Some(_device), Some(position)) = (device, position) else {
            return DeviceStatus {
                kind: StatusKind::Unknown,
                elapsed_seconds: 0,
                text: "No data".to_string(),
                color: ColorToken::Neutral,
            };
        };

        let elapsed = (now - position.server_time).num_seconds();
        let (kind, label, color) = if elapsed > self.timeout_secs {
            (StatusKind::Offline, "Offline", ColorToken::Red)
        } else if !position.valid {
            (StatusKind::NoGps, "No GPS", ColorToken::Orange)
        } else if position.speed > SPEED_THRESHOLD_KMH {
            (StatusKind::Moving, "Moving", ColorToken::Green)
        } else if position.ignition() == Some(true) {
            (StatusKind::Idle, "Engine Idle", ColorToken::Amber)
        } else if position.ignition() == Some(false) || position.speed <= SPEED_THRESHOLD_KMH {
            (StatusKind::Stopped, "Stopped", ColorToken::Red)
        } else {
            (StatusKind::Unknown, "Unknown", ColorToken::Grey)
        };

        DeviceStatus {
            kind,
            elapsed_seconds: elapsed.max(0) as u64,
            text: format!("{label} {}", format_duration(elapsed)),
            color,
        }
    }

    /// Start the periodic refresh task, invoking `callback` every
    /// [`REFRESH_INTERVAL`]. A previously running task is stopped first.
    pub fn start<F>(&mut self, mut callback: F)
    where
        F: FnMut() + Send + 'static,
    {
        self.stop();
        self.refresh = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(REFRESH_INTERVAL);
            // The first tick completes immediately; consume it so the
            // callback only fires after a full interval.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                callback();
            }
        }));
    }

    /// Stop the refresh task if one is running.
    pub fn stop(&mut self) {
        if let Some(handle) = self.refresh.take() {
            handle.abort();
        }
    }

    /// Whether the refresh task is currently held.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.refresh.is_some()
    }
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_SECS)
    }
}

impl Drop for StatusClassifier {
    fn drop(&mut self) {
        self.stop();
    }
}
