//! Randomized frame generator.

use super::EventSource;
use crate::detection::FrameEvent;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Address prefix used for simulated attackers.
pub const ATTACKER_PREFIX: &str = "FA:KE:MA";
/// Address prefix used for simulated benign stations.
pub const NORMAL_PREFIX: &str = "NO:RM:AL";

/// MAC-like address: `prefix` plus three random octets, or six random octets
/// without a prefix. Octets are two-digit uppercase hex.
pub fn random_mac<R: Rng>(rng: &mut R, prefix: Option<&str>) -> String {
    let octets = |rng: &mut R, n: usize| {
        (0..n)
            .map(|_| format!("{:02X}", rng.random::<u8>()))
            .collect::<Vec<_>>()
            .join(":")
    };
    match prefix {
        Some(prefix) => format!("{}:{}", prefix, octets(rng, 3)),
        None => octets(rng, 6),
    }
}

/// Emits deauth frames with probability `deauth_chance`, benign ones otherwise.
#[derive(Debug, Clone)]
pub struct SimulatedSource<R: Rng = StdRng> {
    deauth_chance: f64,
    rng: R,
}

impl SimulatedSource<StdRng> {
    /// Source seeded from the operating system.
    pub fn new(deauth_chance: f64) -> Self {
        Self::with_rng(deauth_chance, StdRng::from_os_rng())
    }

    /// Reproducible source.
    pub fn seeded(deauth_chance: f64, seed: u64) -> Self {
        Self::with_rng(deauth_chance, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SimulatedSource<R> {
    pub fn with_rng(deauth_chance: f64, rng: R) -> Self {
        Self { deauth_chance, rng }
    }

    pub fn deauth_chance(&self) -> f64 {
        self.deauth_chance
    }
}

impl<R: Rng + Send> EventSource for SimulatedSource<R> {
    fn next_frame(&mut self, now: f64) -> Option<FrameEvent> {
        let is_deauth = self.rng.random::<f64>() < self.deauth_chance;
        let prefix = if is_deauth { ATTACKER_PREFIX } else { NORMAL_PREFIX };
        let source_id = random_mac(&mut self.rng, Some(prefix));
        Some(FrameEvent::new(source_id, is_deauth, now))
    }
}
