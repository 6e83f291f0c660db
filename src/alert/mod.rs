//! Alert sinks - render frames and alerts to the console and the alert log.

mod console;
mod logfile;

pub use console::ConsoleSink;
pub use logfile::{header_line, LogFileSink};

use crate::detection::{AlertRecord, FrameEvent};

/// Consumer of detector output.
///
/// Sinks must not fail the detection loop: anything that can go wrong inside a
/// sink is reported and swallowed there.
pub trait AlertSink: Send {
    /// Called for every frame before it reaches the detector.
    fn on_frame(&mut self, _event: &FrameEvent) {}

    /// Called once per triggered alert.
    fn on_alert(&mut self, alert: &AlertRecord);
}

impl<S: AlertSink + ?Sized> AlertSink for Box<S> {
    fn on_frame(&mut self, event: &FrameEvent) {
        (**self).on_frame(event)
    }

    fn on_alert(&mut self, alert: &AlertRecord) {
        (**self).on_alert(alert)
    }
}

/// Fans frames and alerts out to several sinks in registration order.
#[derive(Default)]
pub struct SinkSet {
    sinks: Vec<Box<dyn AlertSink>>,
}

impl SinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, sink: impl AlertSink + 'static) -> Self {
        self.push(sink);
        self
    }

    pub fn push(&mut self, sink: impl AlertSink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl std::fmt::Debug for SinkSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkSet").field("len", &self.sinks.len()).finish()
    }
}

impl AlertSink for SinkSet {
    fn on_frame(&mut self, event: &FrameEvent) {
        for sink in &mut self.sinks {
            sink.on_frame(event);
        }
    }

    fn on_alert(&mut self, alert: &AlertRecord) {
        for sink in &mut self.sinks {
            sink.on_alert(alert);
        }
    }
}
