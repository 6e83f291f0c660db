//! Frame sources feeding the detector.
//!
//! A source only classifies and stamps frames; pacing and cancellation live
//! in [`produce`], which pushes frames into the single ordered channel the
//! detector reads from.

mod simulated;

pub use simulated::{random_mac, SimulatedSource, ATTACKER_PREFIX, NORMAL_PREFIX};

use crate::clock::Clock;
use crate::detection::FrameEvent;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

/// Producer of classified frames.
pub trait EventSource: Send {
    /// Next frame, stamped at `now` where the source has no time of its own.
    /// `None` means the source is exhausted.
    fn next_frame(&mut self, now: f64) -> Option<FrameEvent>;
}

impl<S: EventSource + ?Sized> EventSource for Box<S> {
    fn next_frame(&mut self, now: f64) -> Option<FrameEvent> {
        (**self).next_frame(now)
    }
}

/// Replays a fixed list of frames with their own timestamps.
#[derive(Debug, Default, Clone)]
pub struct ScriptedSource {
    frames: VecDeque<FrameEvent>,
}

impl ScriptedSource {
    pub fn new(frames: impl IntoIterator<Item = FrameEvent>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl EventSource for ScriptedSource {
    fn next_frame(&mut self, _now: f64) -> Option<FrameEvent> {
        self.frames.pop_front()
    }
}

/// Limits for a producer run.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    /// Delay between consecutive frames
    pub interval: Duration,
    /// Stop after this many frames; 0 means unlimited
    pub max_frames: u64,
}

impl Pacing {
    pub fn new(interval: Duration, max_frames: u64) -> Self {
        Self {
            interval,
            max_frames,
        }
    }
}

/// Pull frames from `source` and send them to the detector until the source
/// is exhausted, `max_frames` is reached, the receiver goes away or shutdown
/// is signalled. Returns the number of frames sent.
///
/// The wait between frames is interruptible so shutdown never waits for a
/// full interval.
pub async fn produce<S, C>(
    mut source: S,
    clock: C,
    pacing: Pacing,
    tx: mpsc::Sender<FrameEvent>,
    mut shutdown: watch::Receiver<bool>,
) -> u64
where
    S: EventSource,
    C: Clock,
{
    info!(interval_ms = pacing.interval.as_millis() as u64, "Frame source started");
    let mut sent = 0u64;

    loop {
        if *shutdown.borrow() {
            break;
        }
        let Some(frame) = source.next_frame(clock.now_secs()) else {
            debug!(sent, "Frame source exhausted");
            break;
        };
        if tx.send(frame).await.is_err() {
            debug!("Detector went away, stopping source");
            break;
        }
        sent += 1;
        if pacing.max_frames > 0 && sent >= pacing.max_frames {
            debug!(sent, "Frame limit reached");
            break;
        }

        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            _ = tokio::time::sleep(pacing.interval) => {}
        }
    }

    info!(sent, "Frame source stopped");
    sent
}
