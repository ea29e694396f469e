//! Configuration management for Bitrain components

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Stream generator configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StreamConfig {
    /// Number of lines kept in the buffer
    #[serde(default = "default_buffer_len")]
    pub buffer_len: usize,

    /// Symbols per line
    #[serde(default = "default_line_width")]
    pub line_width: usize,

    /// Tick period in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Probability that a line is emphasized on a render pass
    #[serde(default = "default_emphasis_probability")]
    pub emphasis_probability: f64,

    /// Fixed seed for reproducible streams (random if absent)
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            buffer_len: default_buffer_len(),
            line_width: default_line_width(),
            tick_interval_ms: default_tick_interval_ms(),
            emphasis_probability: default_emphasis_probability(),
            seed: None,
        }
    }
}

impl StreamConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let config: Self = envy::prefixed("BITRAIN_")
            .from_env()
            .map_err(|e| Error::Config(format!("Failed to parse environment variables: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.buffer_len == 0 {
            return Err(Error::Config("buffer_len must be > 0".to_string()));
        }

        if self.line_width == 0 || self.line_width > crate::MAX_LINE_WIDTH {
            return Err(Error::Config(format!(
                "line_width must be between 1 and {}",
                crate::MAX_LINE_WIDTH
            )));
        }

        if self.tick_interval_ms == 0 {
            return Err(Error::Config("tick_interval_ms must be > 0".to_string()));
        }

        if !(0.0..=1.0).contains(&self.emphasis_probability) {
            return Err(Error::Config(
                "emphasis_probability must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

// Default value functions
fn default_buffer_len() -> usize {
    crate::DEFAULT_BUFFER_LEN
}

fn default_line_width() -> usize {
    crate::DEFAULT_LINE_WIDTH
}

fn default_tick_interval_ms() -> u64 {
    crate::DEFAULT_TICK_INTERVAL_MS // 10 ticks per second
}

fn default_emphasis_probability() -> f64 {
    crate::DEFAULT_EMPHASIS_PROBABILITY
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_behavior() {
        let config = StreamConfig::default();
        assert_eq!(config.buffer_len, 50);
        assert_eq!(config.line_width, 6);
        assert_eq!(config.tick_interval(), Duration::from_millis(100));
        assert_eq!(config.emphasis_probability, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_partial_uses_defaults() {
        let config = StreamConfig::from_yaml("line_width: 8\nseed: 42\n").unwrap();
        assert_eq!(config.line_width, 8);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.buffer_len, 50);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = StreamConfig::default();
        config.buffer_len = 0;
        assert!(config.validate().unwrap_err().is_config_error());

        let mut config = StreamConfig::default();
        config.line_width = crate::MAX_LINE_WIDTH + 1;
        assert!(config.validate().is_err());

        let mut config = StreamConfig::default();
        config.tick_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = StreamConfig::default();
        config.emphasis_probability = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_invalid_is_rejected() {
        assert!(StreamConfig::from_yaml("buffer_len: 0\n").is_err());
        assert!(matches!(
            StreamConfig::from_yaml("buffer_len: [1, 2]\n"),
            Err(Error::Serialization(_))
        ));
    }
}
