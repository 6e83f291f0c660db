//! Colored console rendering.

use super::AlertSink;
use crate::config::Config;
use crate::detection::{AlertRecord, FrameEvent};
use colored::{Color, Colorize};
use std::io::{self, Write};
use std::path::Path;

/// Prints frames, alerts and lifecycle notices to a terminal.
pub struct ConsoleSink<W: Write + Send = io::Stdout> {
    out: W,
    color: bool,
    show_frames: bool,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout(color: bool, show_frames: bool) -> Self {
        Self::new(io::stdout(), color, show_frames)
    }
}

impl<W: Write + Send> ConsoleSink<W> {
    pub fn new(out: W, color: bool, show_frames: bool) -> Self {
        Self {
            out,
            color,
            show_frames,
        }
    }

    /// Startup banner with the effective parameters.
    pub fn banner(&mut self, config: &Config) {
        self.line("[*] Starting Deauth Detection Simulator", Color::Cyan);
        let params = format!(
            "    deauth_chance={}, threshold={}, window={}s, packet_rate={}s\n",
            config.simulator.deauth_chance,
            config.detector.threshold,
            config.detector.window_secs,
            config.simulator.rate_secs,
        );
        self.line(&params, Color::Cyan);
    }

    /// Notice printed once the loop has stopped.
    pub fn shutdown_notice(&mut self, reason: &str, log_path: &Path) {
        let notice = format!("\n[!] Exiting simulator ({}).", reason);
        self.line(&notice, Color::Cyan);
        let hint = format!("  Check '{}' for any recorded alerts.", log_path.display());
        self.line(&hint, Color::Cyan);
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, msg: &str, color: Color) {
        let rendered = if self.color {
            msg.color(color).to_string()
        } else {
            msg.to_string()
        };
        let _ = writeln!(self.out, "{}", rendered);
    }
}

impl<W: Write + Send> AlertSink for ConsoleSink<W> {
    fn on_frame(&mut self, event: &FrameEvent) {
        if !self.show_frames {
            return;
        }
        if event.is_deauth {
            let msg = format!("[!] Deauth frame detected from {}", event.source_id);
            self.line(&msg, Color::Yellow);
        } else {
            let msg = format!("[ ] Normal packet from {}", event.source_id);
            self.line(&msg, Color::Green);
        }
    }

    fn on_alert(&mut self, alert: &AlertRecord) {
        let msg = format!("\n{}\n", alert);
        self.line(&msg, Color::Red);
    }
}
