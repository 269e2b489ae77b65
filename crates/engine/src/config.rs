//! Engine configuration

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::types::{MOVE_BUDGET, SETTLE_MS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Moves per session
    pub move_budget: u32,
    /// Pause before every scan so a renderer can show the intermediate board.
    /// Zero disables the pause.
    pub settle_latency: Duration,
    /// Board RNG seed; None seeds from the clock
    pub seed: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            move_budget: MOVE_BUDGET,
            settle_latency: Duration::from_millis(SETTLE_MS),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Headless defaults: no settle pause
    pub fn headless() -> Self {
        Self {
            settle_latency: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Create from environment variables
    ///
    /// - `FLX_MOVE_BUDGET`: moves per session (default 30)
    /// - `FLX_SETTLE_MS`: settle pause in milliseconds (default 300)
    /// - `FLX_SEED`: board seed (default: clock)
    pub fn from_env() -> Self {
        use std::env;

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let move_budget = lookup("FLX_MOVE_BUDGET")
            .and_then(|s| s.trim().parse().ok())
            .filter(|n: &u32| *n > 0)
            .unwrap_or(defaults.move_budget);

        let settle_latency = lookup("FLX_SETTLE_MS")
            .and_then(|s| s.trim().parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.settle_latency);

        let seed = lookup("FLX_SEED").and_then(|s| s.trim().parse().ok());

        Self {
            move_budget,
            settle_latency,
            seed,
        }
    }

    /// The configured seed, or one derived from the clock
    pub fn resolved_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
                .unwrap_or(1)
        })
    }
}
