//! Deauthentication-flood detection.
//!
//! The detector owns one detection cycle worth of state: a sliding window of
//! deauth timestamps and a per-source tally. Every frame may advance the
//! window; once the in-window count reaches the threshold an [`AlertRecord`]
//! is produced and both structures are cleared to start the next cycle.

mod tally;
mod window;

pub use tally::AttackerTally;
pub use window::SlidingWindow;

use crate::alert::AlertSink;
use crate::clock::{Clock, SystemClock};
use crate::config::DetectorConfig;
use crate::detection::{AlertRecord, FrameEvent};
use crate::metrics::{ALERTS_RAISED, DEAUTH_FRAMES, FRAMES_PROCESSED};
use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, trace, warn};

/// Number of sources reported with each alert.
pub const TOP_SOURCES: usize = 3;

/// Counters accumulated over the whole run, across detection cycles.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DetectorStats {
    pub frames: u64,
    pub deauth_frames: u64,
    pub alerts: u64,
}

/// Threshold/window detector for deauthentication floods.
#[derive(Debug)]
pub struct DeauthDetector<C: Clock = SystemClock> {
    window: SlidingWindow,
    tally: AttackerTally,
    threshold: usize,
    window_secs: u64,
    clock: C,
    stats: DetectorStats,
}

impl DeauthDetector<SystemClock> {
    /// Create a detector reading the wall clock.
    pub fn new(threshold: usize, window_secs: u64) -> Self {
        Self::with_clock(threshold, window_secs, SystemClock)
    }

    pub fn from_config(config: &DetectorConfig) -> Self {
        Self::new(config.threshold, config.window_secs)
    }
}

impl<C: Clock> DeauthDetector<C> {
    /// Create a detector with an injected clock.
    pub fn with_clock(threshold: usize, window_secs: u64, clock: C) -> Self {
        Self {
            window: SlidingWindow::new(window_secs),
            tally: AttackerTally::new(),
            threshold,
            window_secs,
            clock,
            stats: DetectorStats::default(),
        }
    }

    /// Feed one frame through the detector.
    ///
    /// Benign frames leave window and tally untouched but still advance
    /// eviction. Returns the alert if this frame completed a detection cycle.
    pub fn process(&mut self, event: &FrameEvent) -> Option<AlertRecord> {
        self.stats.frames += 1;
        FRAMES_PROCESSED.inc();

        if event.is_deauth {
            self.stats.deauth_frames += 1;
            DEAUTH_FRAMES.inc();
            self.window.record(event.timestamp);
            self.tally.record(&event.source_id);
            debug!(source = %event.source_id, ts = event.timestamp, "Deauth frame recorded");
        }

        // read after recording so the new frame is inside the eviction baseline
        let now = self.clock.now_secs();
        let evicted = self.window.evict(now);
        if evicted > 0 {
            trace!(evicted, "Expired deauth timestamps evicted");
        }

        let count = self.window.count();
        if count < self.threshold {
            return None;
        }

        let alert = AlertRecord::new(now, count, self.window_secs, self.tally.top(TOP_SOURCES));
        warn!(
            count,
            window_secs = self.window_secs,
            top = %alert.top_summary(),
            "Deauth flood threshold reached"
        );

        self.stats.alerts += 1;
        ALERTS_RAISED.inc();
        self.reset();

        Some(alert)
    }

    /// Current in-window deauth count.
    pub fn count(&self) -> usize {
        self.window.count()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn window_secs(&self) -> u64 {
        self.window_secs
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    pub fn tally(&self) -> &AttackerTally {
        &self.tally
    }

    pub fn stats(&self) -> DetectorStats {
        self.stats
    }

    /// Start a fresh detection cycle.
    pub fn reset(&mut self) {
        self.window.reset();
        self.tally.reset();
    }

    /// Consume frames until the channel closes or shutdown is signalled.
    ///
    /// Frames arrive through a single ordered channel so window and tally are
    /// only ever touched from this loop.
    pub async fn run<S: AlertSink + ?Sized>(
        mut self,
        mut frames: mpsc::Receiver<FrameEvent>,
        sink: &mut S,
        mut shutdown: watch::Receiver<bool>,
    ) -> DetectorStats {
        info!(
            threshold = self.threshold,
            window_secs = self.window_secs,
            "Detector started"
        );

        loop {
            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        debug!("Detector received shutdown");
                        break;
                    }
                }
                frame = frames.recv() => {
                    let Some(frame) = frame else {
                        debug!("Frame channel closed");
                        break;
                    };
                    sink.on_frame(&frame);
                    if let Some(alert) = self.process(&frame) {
                        sink.on_alert(&alert);
                    }
                }
            }
        }

        info!(
            frames = self.stats.frames,
            deauth_frames = self.stats.deauth_frames,
            alerts = self.stats.alerts,
            "Detector stopped"
        );
        self.stats
    }
}
