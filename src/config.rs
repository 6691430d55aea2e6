use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

pub const DEFAULT_MIN: i64 = 1;
pub const DEFAULT_MAX: i64 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("empty target range: min {min} is greater than max {max}")]
    EmptyRange { min: i64, max: i64 },
}

/// Settings for one run of the game, shared by every round it plays.
/// Only built through [`GameConfig::new`] or `Default`, so the range is
/// never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    min: i64,
    max: i64,
    /// Fixed seed for reproducible draws. `None` seeds from the OS.
    seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn new(min: i64, max: i64, seed: Option<u64>) -> Result<Self, ConfigError> {
        let config = Self { min, max, seed };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::EmptyRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn range(&self) -> RangeInclusive<i64> {
        self.min..=self.max
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}
