use std::ops::RangeInclusive;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sortviz_core::Algorithm;

use crate::error::{Result, SchedulerError};

pub const DEFAULT_SIZE: usize = 30;
pub const DEFAULT_INTERVAL_MS: u64 = 30;
pub const DEFAULT_DISPLAY_HEIGHT: u32 = 600;

/// Buffer sizes a front end should offer. Not enforced.
pub const SIZE_RANGE: RangeInclusive<usize> = 10..=80;
/// Tick intervals (ms) a front end should offer. Not enforced.
pub const INTERVAL_RANGE: RangeInclusive<u64> = 5..=200;

/// Settings for one [`SortSession`](crate::SortSession).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of elements in the buffer
    pub size: usize,
    /// Delay between two ticks of a paced run
    pub interval_ms: u64,
    pub algorithm: Algorithm,
    /// Height the largest value is scaled towards
    pub display_height: u32,
    /// Fixed shuffle seed; random when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            interval_ms: DEFAULT_INTERVAL_MS,
            algorithm: Algorithm::default(),
            display_height: DEFAULT_DISPLAY_HEIGHT,
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Rejects non-positive size, interval or display height.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(SchedulerError::invalid("size must be positive"));
        }
        self.validate_pacing()
    }

    /// Same as [`validate`](Self::validate) minus the size check, for
    /// sessions built around a caller-supplied buffer.
    pub(crate) fn validate_pacing(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(SchedulerError::invalid("interval must be positive"));
        }
        if self.display_height == 0 {
            return Err(SchedulerError::invalid("display height must be positive"));
        }
        Ok(())
    }

    pub fn in_recommended_range(&self) -> bool {
        SIZE_RANGE.contains(&self.size) && INTERVAL_RANGE.contains(&self.interval_ms)
    }
}
