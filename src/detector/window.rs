//! Sliding time window over deauthentication timestamps.

use std::collections::VecDeque;

/// Sliding time window that keeps deauth timestamps within a fixed duration.
///
/// Timestamps are kept in arrival order so expired entries are always at the
/// front and eviction never scans past the first retained entry.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    /// Deauth timestamps, oldest first
    timestamps: VecDeque<f64>,
    /// Window duration in seconds
    window_secs: f64,
}

impl SlidingWindow {
    /// Create a new sliding window with the given duration in seconds.
    pub fn new(window_secs: u64) -> Self {
        Self::with_duration(window_secs as f64)
    }

    /// Create a window with a fractional duration.
    pub fn with_duration(window_secs: f64) -> Self {
        Self {
            timestamps: VecDeque::new(),
            window_secs,
        }
    }

    /// Window duration in seconds.
    pub fn window_secs(&self) -> f64 {
        self.window_secs
    }

    /// Append a deauth timestamp.
    ///
    /// Callers feed timestamps from a monotonic source; ordering is not
    /// re-checked here.
    pub fn record(&mut self, timestamp: f64) {
        self.timestamps.push_back(timestamp);
    }

    /// Drop timestamps older than the window relative to `now`.
    ///
    /// After this returns every retained `t` satisfies `now - t <= window`.
    /// Returns the number of entries removed.
    pub fn evict(&mut self, now: f64) -> usize {
        let mut removed = 0;
        while let Some(&front) = self.timestamps.front() {
            if now - front > self.window_secs {
                self.timestamps.pop_front();
                removed += 1;
            } else {
                break;
            }
        }
        removed
    }

    /// Number of timestamps currently retained.
    pub fn count(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Oldest retained timestamp, if any.
    pub fn oldest(&self) -> Option<f64> {
        self.timestamps.front().copied()
    }

    /// Iterate over retained timestamps, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.timestamps.iter()
    }

    /// Clear all timestamps.
    pub fn reset(&mut self) {
        self.timestamps.clear();
    }
}
