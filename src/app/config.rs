//! Configuration Management

use crate::classify::ClassifyConfig;
use crate::dispatch::DispatchConfig;
use crate::tracker::DebounceConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterpreterConfig {
    /// Buffer settings
    #[serde(default)]
    pub buffer: BufferConfig,
    /// Classifier thresholds
    #[serde(default)]
    pub classify: ClassifyConfig,
    /// Debounce settings
    #[serde(default)]
    pub debounce: DebounceConfig,
    /// Dispatch settings
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

/// Buffer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferConfig {
    /// Sample window capacity
    pub window_capacity: usize,
    /// Ingest ring capacity (power of 2)
    pub ingest_capacity: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            window_capacity: crate::capture::window::DEFAULT_CAPACITY,
            ingest_capacity: crate::capture::ingest::DEFAULT_CAPACITY,
        }
    }
}

impl InterpreterConfig {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.buffer.window_capacity == 0 {
            return Err(crate::Error::Config(
                "window_capacity must be > 0".to_string(),
            ));
        }
        if self.buffer.ingest_capacity == 0 || !self.buffer.ingest_capacity.is_power_of_two() {
            return Err(crate::Error::Config(format!(
                "ingest_capacity must be a power of 2, got {}",
                self.buffer.ingest_capacity
            )));
        }
        if !(0.0..=1.0).contains(&self.classify.confidence_threshold) {
            return Err(crate::Error::Config(format!(
                "confidence_threshold must be in [0, 1], got {}",
                self.classify.confidence_threshold
            )));
        }
        if self.classify.tap_max_displacement_px <= 0.0
            || self.classify.swipe_min_displacement_px <= 0.0
            || self.classify.hold_max_displacement_px <= 0.0
            || self.classify.scroll_min_displacement_px <= 0.0
        {
            return Err(crate::Error::Config(
                "displacement thresholds must be > 0".to_string(),
            ));
        }
        if self.classify.tap_max_span_ms == 0
            || self.classify.swipe_max_span_ms == 0
            || self.classify.hold_min_span_ms == 0
            || self.classify.scroll_min_span_ms == 0
        {
            return Err(crate::Error::Config(
                "span thresholds must be > 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.classify.scroll_min_pressure) {
            return Err(crate::Error::Config(format!(
                "scroll_min_pressure must be in [0, 1], got {}",
                self.classify.scroll_min_pressure
            )));
        }
        if self.debounce.cooldown_ms == 0 {
            return Err(crate::Error::Config("cooldown_ms must be > 0".to_string()));
        }
        if self.dispatch.scroll_smoothing == 0 {
            return Err(crate::Error::Config(
                "scroll_smoothing must be > 0".to_string(),
            ));
        }
        if self.dispatch.scroll_min_output < 0.0 {
            return Err(crate::Error::Config(format!(
                "scroll_min_output must be >= 0, got {}",
                self.dispatch.scroll_min_output
            )));
        }
        Ok(())
    }

    /// Load config from file
    pub fn load(path: &PathBuf) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from default location
    pub fn load_default() -> Result<Self, crate::Error> {
        let path = Self::default_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file
    pub fn save(&self, path: &PathBuf) -> Result<(), crate::Error> {
        let content = toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to default location
    pub fn save_default(&self) -> Result<(), crate::Error> {
        self.save(&Self::default_path())
    }

    /// Get default config path
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".gesture-interpreter").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
