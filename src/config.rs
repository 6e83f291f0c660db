//! TOML-based configuration for the detector, the simulated source and the
//! alert log. Command-line flags are applied on top in `main`.

use crate::source::Pacing;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_DEAUTH_CHANCE: f64 = 0.2;
const DEFAULT_THRESHOLD: usize = 5;
const DEFAULT_WINDOW_SECS: u64 = 10;
const DEFAULT_RATE_SECS: f64 = 0.5;
const DEFAULT_LOG_PATH: &str = "deauth_alerts.log";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
    #[serde(default)]
    pub alerts: AlertConfig,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Format of diagnostic output on stderr
    #[serde(default)]
    pub log_format: LogFormat,
    /// Colorize console output
    #[serde(default = "default_true")]
    pub color: bool,
    /// Print a console line for every frame
    #[serde(default = "default_true")]
    pub show_frames: bool,
}

/// Threshold/window rule of the detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Deauth frames within the window needed to raise an alert
    #[serde(default = "default_threshold")]
    pub threshold: usize,
    /// Sliding window duration in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Probability (0..1) that a generated frame is a deauth frame
    #[serde(default = "default_deauth_chance")]
    pub deauth_chance: f64,
    /// Seconds between generated frames
    #[serde(default = "default_rate_secs")]
    pub rate_secs: f64,
    /// Fixed RNG seed for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
    /// Stop after this many frames (0 = run until interrupted)
    #[serde(default)]
    pub max_frames: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Append-only alert log
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

fn default_true() -> bool { true }
fn default_log_level() -> String { "info".to_string() }
fn default_threshold() -> usize { DEFAULT_THRESHOLD }
fn default_window_secs() -> u64 { DEFAULT_WINDOW_SECS }
fn default_deauth_chance() -> f64 { DEFAULT_DEAUTH_CHANCE }
fn default_rate_secs() -> f64 { DEFAULT_RATE_SECS }
fn default_log_path() -> PathBuf { PathBuf::from(DEFAULT_LOG_PATH) }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Text,
            color: true,
            show_frames: true,
        }
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            window_secs: DEFAULT_WINDOW_SECS,
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            deauth_chance: DEFAULT_DEAUTH_CHANCE,
            rate_secs: DEFAULT_RATE_SECS,
            seed: None,
            max_frames: 0,
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
        }
    }
}

impl SimulatorConfig {
    /// Inter-frame delay and frame limit for the producer.
    ///
    /// Only meaningful after [`Config::validate`] accepted `rate_secs`.
    pub fn pacing(&self) -> Pacing {
        let interval = Duration::try_from_secs_f64(self.rate_secs).unwrap_or(Duration::ZERO);
        Pacing::new(interval, self.max_frames)
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Reject values the detection loop cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.detector.threshold == 0 {
            bail!("threshold must be at least 1");
        }
        if self.detector.window_secs == 0 {
            bail!("window must be a positive number of seconds");
        }
        let chance = self.simulator.deauth_chance;
        if !(0.0..=1.0).contains(&chance) {
            bail!("deauth chance must be between 0 and 1, got {}", chance);
        }
        let rate = self.simulator.rate_secs;
        if !rate.is_finite() || rate < 0.0 {
            bail!("rate must be a non-negative number of seconds, got {}", rate);
        }
        if Duration::try_from_secs_f64(rate).is_err() {
            bail!("rate of {} seconds is too large for a frame delay", rate);
        }
        if self.alerts.log_path.as_os_str().is_empty() {
            bail!("log path must not be empty");
        }
        Ok(())
    }
}
