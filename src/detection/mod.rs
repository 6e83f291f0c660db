//! Common types for frame events and deauthentication alerts.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Format used for the human-readable alert timestamp.
pub const ALERT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A classified frame handed to the detector by an event source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameEvent {
    /// Transmitter identifier, usually a MAC-like string
    pub source_id: String,
    /// Whether this frame is a deauthentication frame
    pub is_deauth: bool,
    /// Arrival time in seconds since the Unix epoch
    pub timestamp: f64,
}

impl FrameEvent {
    pub fn new(source_id: impl Into<String>, is_deauth: bool, timestamp: f64) -> Self {
        Self {
            source_id: source_id.into(),
            is_deauth,
            timestamp,
        }
    }

    /// A deauthentication frame from `source_id`.
    pub fn deauth(source_id: impl Into<String>, timestamp: f64) -> Self {
        Self::new(source_id, true, timestamp)
    }

    /// A benign frame from `source_id`.
    pub fn benign(source_id: impl Into<String>, timestamp: f64) -> Self {
        Self::new(source_id, false, timestamp)
    }
}

/// One entry of the attacker ranking attached to an alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopSource {
    pub source_id: String,
    pub count: u64,
}

impl TopSource {
    pub fn new(source_id: impl Into<String>, count: u64) -> Self {
        Self {
            source_id: source_id.into(),
            count,
        }
    }
}

impl fmt::Display for TopSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.source_id, self.count)
    }
}

/// A triggered deauthentication-flood alert.
///
/// Built once per detection cycle that crosses the threshold and handed to the
/// alert sinks; the detector keeps no reference to it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    /// When the alert fired
    pub raised_at: DateTime<Utc>,
    /// Deauth frames inside the window when the threshold was crossed
    pub count: usize,
    /// Window duration the count refers to
    pub window_secs: u64,
    /// Up to three sources, descending by count
    pub top_sources: Vec<TopSource>,
}

impl AlertRecord {
    /// Build an alert stamped with the epoch time `now`.
    pub fn new(now: f64, count: usize, window_secs: u64, top_sources: Vec<TopSource>) -> Self {
        Self {
            raised_at: epoch_to_utc(now),
            count,
            window_secs,
            top_sources,
        }
    }

    /// Local wall-clock time of the alert, `YYYY-MM-DD HH:MM:SS`.
    pub fn timestamp(&self) -> String {
        self.raised_at
            .with_timezone(&Local)
            .format(ALERT_TIME_FORMAT)
            .to_string()
    }

    /// The `src(n), src(n)` ranking as rendered in alert lines.
    pub fn top_summary(&self) -> String {
        self.top_sources
            .iter()
            .map(TopSource::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AlertRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ALERT] {} - Possible Deauth Attack Detected! {} deauth frames in last {} seconds. Top: {}",
            self.timestamp(),
            self.count,
            self.window_secs,
            self.top_summary()
        )
    }
}

fn epoch_to_utc(secs: f64) -> DateTime<Utc> {
    if !secs.is_finite() {
        return Utc::now();
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9) as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999)).unwrap_or_else(Utc::now)
}
