//! deauthwatch - deauthentication-flood detector
//!
//! Counts deauthentication frames in a sliding time window and raises an
//! alert when the count reaches a threshold. Frames come from a pluggable
//! source (a randomized simulator in the shipped binary); alerts go to the
//! console and an append-only log.

pub mod alert;
pub mod clock;
pub mod config;
pub mod detection;
pub mod detector;
pub mod metrics;
pub mod source;

// Re-export commonly used types
pub use config::*;
pub use detection::*;
pub use detector::{DeauthDetector, DetectorStats};
