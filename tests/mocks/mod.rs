//! Mock infrastructure for testing.

use deauthwatch::alert::AlertSink;
use deauthwatch::clock::ManualClock;
use deauthwatch::detection::{AlertRecord, FrameEvent};
use deauthwatch::detector::DeauthDetector;
use std::sync::{Arc, Mutex};

/// Sink that records everything it receives; clones share storage.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub frames: Arc<Mutex<Vec<FrameEvent>>>,
    pub alerts: Arc<Mutex<Vec<AlertRecord>>>,
}

impl RecordingSink {
    pub fn alerts(&self) -> Vec<AlertRecord> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }
}

impl AlertSink for RecordingSink {
    fn on_frame(&mut self, event: &FrameEvent) {
        self.frames.lock().unwrap().push(event.clone());
    }

    fn on_alert(&mut self, alert: &AlertRecord) {
        self.alerts.lock().unwrap().push(alert.clone());
    }
}

/// Detector on a manual clock, plus a handle to that clock.
pub fn mock_detector(threshold: usize, window_secs: u64) -> (DeauthDetector<Arc<ManualClock>>, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(0.0));
    let detector = DeauthDetector::with_clock(threshold, window_secs, Arc::clone(&clock));
    (detector, clock)
}

/// Feed a frame with the clock moved to the frame's own timestamp.
pub fn feed_at(
    detector: &mut DeauthDetector<Arc<ManualClock>>,
    clock: &ManualClock,
    event: FrameEvent,
) -> Option<AlertRecord> {
    clock.set(event.timestamp);
    detector.process(&event)
}

/// Deauth frames from `source` at each of `times`.
pub fn deauth_burst(source: &str, times: &[f64]) -> Vec<FrameEvent> {
    times.iter().map(|t| FrameEvent::deauth(source, *t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_sink_shares_storage() {
        let sink = RecordingSink::default();
        let mut handle = sink.clone();
        handle.on_frame(&FrameEvent::benign("N", 0.0));
        handle.on_alert(&AlertRecord::new(0.0, 1, 10, vec![]));
        assert_eq!(sink.frame_count(), 1);
        assert_eq!(sink.alerts().len(), 1);
    }

    #[test]
    fn test_deauth_burst() {
        let frames = deauth_burst("A", &[0.0, 1.0]);
        assert_eq!(frames.len(), 2);
        assert!(frames.iter().all(|f| f.is_deauth && f.source_id == "A"));
    }
}
