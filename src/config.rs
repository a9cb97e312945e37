//! # Configuration
//!
//! Everything the kitchen needs is fixed at construction: shelf capacities, the Overflow decay
//! multiplier, the arrival tick and rate, and the courier delay window. [`KitchenConfig`]
//! deserializes from JSON with every field optional, falling back to the defaults below.
//!
//! ```json
//! {
//!   "shelves": { "hot": 15, "cold": 15, "frozen": 15, "overflow": 20 },
//!   "arrival": { "rate_per_second": 3.25 },
//!   "pickup": { "min_delay_ms": 2000, "max_delay_ms": 6000 },
//!   "seed": 42
//! }
//! ```

use crate::model::Temperature;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    pub hot: usize,
    pub cold: usize,
    pub frozen: usize,
    pub overflow: usize,
    pub overflow_decay_multiplier: f64,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            hot: 15,
            cold: 15,
            frozen: 15,
            overflow: 20,
            overflow_decay_multiplier: 2.0,
        }
    }
}

impl ShelfConfig {
    pub fn capacity_for(&self, temperature: Temperature) -> usize {
        match temperature {
            Temperature::Hot => self.hot,
            Temperature::Cold => self.cold,
            Temperature::Frozen => self.frozen,
        }
    }

    /// Sum of every shelf's capacity.
    pub fn total_capacity(&self) -> usize {
        self.hot + self.cold + self.frozen + self.overflow
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArrivalConfig {
    pub tick_ms: u64,
    /// Mean arrivals per second.
    pub rate_per_second: f64,
    /// Quiet time after the last submission before the source reports itself exhausted.
    pub grace_ms: u64,
    /// Longest wait for the arrival progress lock before a check is deferred.
    pub check_timeout_ms: u64,
}

impl Default for ArrivalConfig {
    fn default() -> Self {
        Self {
            tick_ms: 100,
            rate_per_second: 3.25,
            grace_ms: 500,
            check_timeout_ms: 200,
        }
    }
}

impl ArrivalConfig {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }

    pub fn check_timeout(&self) -> Duration {
        Duration::from_millis(self.check_timeout_ms)
    }

    /// Chance that a single tick produces an arrival.
    pub fn fire_probability(&self) -> f64 {
        let ticks_per_second = 1000.0 / self.tick_ms as f64;
        (self.rate_per_second / ticks_per_second).clamp(0.0, 1.0)
    }
}

/// Courier delay window, inclusive on both ends.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PickupConfig {
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            min_delay_ms: 2_000,
            max_delay_ms: 6_000,
        }
    }
}

impl PickupConfig {
    pub fn min_delay(&self) -> Duration {
        Duration::from_millis(self.min_delay_ms)
    }

    pub fn max_delay(&self) -> Duration {
        Duration::from_millis(self.max_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct KitchenConfig {
    pub shelves: ShelfConfig,
    pub arrival: ArrivalConfig,
    pub pickup: PickupConfig,
    /// Seeds the simulation's randomness for reproducible runs.
    pub seed: Option<u64>,
}

impl KitchenConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: KitchenConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let multiplier = self.shelves.overflow_decay_multiplier;
        if !(multiplier.is_finite() && multiplier >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "overflow_decay_multiplier must be at least 1, got {}",
                multiplier
            )));
        }
        if self.shelves.overflow == 0 {
            return Err(ConfigError::Invalid("overflow capacity must be positive".into()));
        }
        if self.arrival.tick_ms == 0 {
            return Err(ConfigError::Invalid("arrival tick_ms must be positive".into()));
        }
        let rate = self.arrival.rate_per_second;
        if !(rate.is_finite() && rate >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "arrival rate_per_second must be non-negative, got {}",
                rate
            )));
        }
        if self.pickup.min_delay_ms > self.pickup.max_delay_ms {
            return Err(ConfigError::Invalid(format!(
                "pickup window is inverted: {}ms > {}ms",
                self.pickup.min_delay_ms, self.pickup.max_delay_ms
            )));
        }
        Ok(())
    }
}
