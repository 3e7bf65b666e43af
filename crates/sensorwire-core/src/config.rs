//! Decoder configuration.
//!
//! Every field has a default matching the sensor modules' documented
//! behavior, so an empty TOML document is a valid configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::protocols::line::layout::DEFAULT_MAX_LINE_LEN;
use crate::quantity::Quantity;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid {quantity} limits: min {min} is greater than max {max}")]
    InvertedLimits { quantity: Quantity, min: f32, max: f32 },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub line: LineConfig,
    pub frame: FrameConfig,
    pub limits: RangeLimits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    /// Longest line kept before the buffer is discarded.
    pub max_line_len: usize,
    /// Apply humidity/temperature limits to line records.
    pub validate_ranges: bool,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            max_line_len: DEFAULT_MAX_LINE_LEN,
            validate_ranges: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    /// Reject frames whose checksum byte does not match.
    pub strict_checksum: bool,
    /// Longest wait for the first byte of a burst.
    pub frame_timeout_ms: u64,
    /// Silence after which a burst is considered complete.
    pub inter_byte_gap_ms: u64,
    pub poll_interval_ms: u64,
    /// Most bytes read in one burst.
    pub burst_capacity: usize,
    /// Bound on the byte window kept between bursts.
    pub window_capacity: usize,
}

impl FrameConfig {
    pub fn frame_timeout(&self) -> Duration {
        Duration::from_millis(self.frame_timeout_ms)
    }

    pub fn inter_byte_gap(&self) -> Duration {
        Duration::from_millis(self.inter_byte_gap_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            strict_checksum: false,
            frame_timeout_ms: 2000,
            inter_byte_gap_ms: 100,
            poll_interval_ms: 10,
            burst_capacity: 64,
            window_capacity: 128,
        }
    }
}

/// Inclusive bounds for one quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// NaN is never contained.
    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeLimits {
    pub humidity: Bounds,
    pub temperature: Bounds,
    pub tvoc: Bounds,
    pub ch2o: Bounds,
    pub co2: Bounds,
}

impl RangeLimits {
    pub fn bounds(&self, quantity: Quantity) -> Bounds {
        match quantity {
            Quantity::Humidity => self.humidity,
            Quantity::Temperature => self.temperature,
            Quantity::Tvoc => self.tvoc,
            Quantity::Ch2o => self.ch2o,
            Quantity::Co2 => self.co2,
        }
    }
}

impl Default for RangeLimits {
    fn default() -> Self {
        Self {
            humidity: Bounds::new(0.0, 100.0),
            temperature: Bounds::new(-40.0, 125.0),
            tvoc: Bounds::new(0.0, 10.0),
            ch2o: Bounds::new(0.0, 2.0),
            co2: Bounds::new(0.0, 10.0),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        for quantity in Quantity::LINE.into_iter().chain(Quantity::FRAME) {
            let bounds = self.limits.bounds(quantity);
            if bounds.min > bounds.max {
                return Err(ConfigError::InvertedLimits {
                    quantity,
                    min: bounds.min,
                    max: bounds.max,
                });
            }
        }
        Ok(())
    }
}
