//! Configuration management for the sampling engine
//!
//! All configurable parameters in one place with environment variable
//! overrides. Follows the principle: sensible defaults, configurable in
//! production.

use std::env;
use tracing::info;

use crate::constants::{
    DEFAULT_GROUP_COUNT, DEFAULT_POPULATION_MEAN, DEFAULT_POPULATION_SIZE,
    DEFAULT_POPULATION_STDDEV, DEFAULT_SAMPLE_SIZE, MAX_SAMPLE_SIZE, MIN_SAMPLE_SIZE,
};
use crate::errors::{EngineError, Result};

/// Parameters of the synthetic population
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationConfig {
    /// Mean of the generating normal distribution (μ)
    pub mean: f64,
    /// Standard deviation of the generating normal distribution (σ)
    pub stddev: f64,
    /// Number of measurements to generate
    pub size: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            mean: DEFAULT_POPULATION_MEAN,
            stddev: DEFAULT_POPULATION_STDDEV,
            size: DEFAULT_POPULATION_SIZE,
        }
    }
}

impl PopulationConfig {
    /// Load from environment variables (SAMPLING_POPULATION_*)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = env::var("SAMPLING_POPULATION_MEAN") {
            if let Ok(n) = val.parse() {
                config.mean = n;
            }
        }
        if let Ok(val) = env::var("SAMPLING_POPULATION_STDDEV") {
            if let Ok(n) = val.parse() {
                config.stddev = n;
            }
        }
        if let Ok(val) = env::var("SAMPLING_POPULATION_SIZE") {
            if let Ok(n) = val.parse() {
                config.size = n;
            }
        }

        config
    }

    /// Reject parameters the generator cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.size < 1 {
            return Err(EngineError::EmptyPopulation);
        }
        if !self.stddev.is_finite() || self.stddev <= 0.0 || !self.mean.is_finite() {
            return Err(EngineError::InvalidDistribution {
                mean: self.mean,
                stddev: self.stddev,
            });
        }
        Ok(())
    }
}

/// Parameters of the group engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Number of groups, including the reference group
    pub group_count: usize,
    /// Sample size every group starts with
    pub default_sample_size: usize,
    /// Index of the reference group all others are compared against
    pub reference_index: usize,
    /// Lower bound of the slider range
    pub min_sample_size: usize,
    /// Upper bound of the slider range
    pub max_sample_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            group_count: DEFAULT_GROUP_COUNT,
            default_sample_size: DEFAULT_SAMPLE_SIZE,
            // Last group is the reference, matching the classic layout
            // where groups 1..G-1 are compared against group G
            reference_index: DEFAULT_GROUP_COUNT - 1,
            min_sample_size: MIN_SAMPLE_SIZE,
            max_sample_size: MAX_SAMPLE_SIZE,
        }
    }
}

impl EngineConfig {
    /// Load from environment variables (SAMPLING_*)
    ///
    /// If SAMPLING_GROUP_COUNT is set without SAMPLING_REFERENCE_INDEX, the
    /// reference follows to the new last group.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = env::var("SAMPLING_GROUP_COUNT") {
            if let Ok(n) = val.parse::<usize>() {
                config.group_count = n;
                config.reference_index = n.saturating_sub(1);
            }
        }
        if let Ok(val) = env::var("SAMPLING_REFERENCE_INDEX") {
            if let Ok(n) = val.parse() {
                config.reference_index = n;
            }
        }
        if let Ok(val) = env::var("SAMPLING_DEFAULT_SAMPLE_SIZE") {
            if let Ok(n) = val.parse() {
                config.default_sample_size = n;
            }
        }
        if let Ok(val) = env::var("SAMPLING_MIN_SAMPLE_SIZE") {
            if let Ok(n) = val.parse() {
                config.min_sample_size = n;
            }
        }
        if let Ok(val) = env::var("SAMPLING_MAX_SAMPLE_SIZE") {
            if let Ok(n) = val.parse() {
                config.max_sample_size = n;
            }
        }

        info!(
            group_count = config.group_count,
            reference_index = config.reference_index,
            default_sample_size = config.default_sample_size,
            "engine configuration loaded"
        );

        config
    }

    /// Reject configurations the engine cannot start from.
    pub fn validate(&self) -> Result<()> {
        if self.group_count < 2 {
            return Err(EngineError::InvalidGroupCount(self.group_count));
        }
        if self.reference_index >= self.group_count {
            return Err(EngineError::InvalidReferenceIndex {
                index: self.reference_index,
                group_count: self.group_count,
            });
        }
        if self.min_sample_size < MIN_SAMPLE_SIZE || self.min_sample_size > self.max_sample_size {
            return Err(EngineError::InvalidSizeBounds {
                min: self.min_sample_size,
                max: self.max_sample_size,
                floor: MIN_SAMPLE_SIZE,
            });
        }
        if self.default_sample_size < self.min_sample_size
            || self.default_sample_size > self.max_sample_size
        {
            return Err(EngineError::InvalidDefaultSize {
                size: self.default_sample_size,
                min: self.min_sample_size,
                max: self.max_sample_size,
            });
        }
        Ok(())
    }
}
