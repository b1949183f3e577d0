//! Scheduler timing configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Longest accepted tick interval (one day).
pub const MAX_INTERVAL_MINUTES: u64 = 24 * 60;

const fn default_interval_minutes() -> u64 {
    5
}

/// How often the alert scheduler ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Minutes between ticks. Overridden by `POLL_INTERVAL_MINUTES`.
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,
}

impl SchedulerConfig {
    /// Tick interval as a [`Duration`].
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes.saturating_mul(60))
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
        }
    }
}
