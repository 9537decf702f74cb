//! Engine configuration.
//!
//! Latency values are UX tuning knobs, not semantic contracts: tests zero
//! them out or run under paused time.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Simulated-latency tuning for sessions and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    /// Base "thinking" delay applied to every text turn, in ms.
    pub thinking_base_ms: u64,
    /// Additional thinking delay per input character, in ms.
    pub thinking_per_char_ms: u64,
    /// Upper bound of the uniform thinking jitter, in ms.
    pub thinking_jitter_ms: u64,
    /// Lower bound of the image-analysis delay, in ms (inclusive).
    pub analysis_min_ms: u64,
    /// Upper bound of the image-analysis delay, in ms (exclusive).
    pub analysis_max_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            thinking_base_ms: 1000,
            thinking_per_char_ms: 20,
            thinking_jitter_ms: 1000,
            analysis_min_ms: 2000,
            analysis_max_ms: 3000,
        }
    }
}

impl LatencyConfig {
    /// A zero-latency profile for tests.
    pub fn instant() -> Self {
        Self {
            thinking_base_ms: 0,
            thinking_per_char_ms: 0,
            thinking_jitter_ms: 0,
            analysis_min_ms: 0,
            analysis_max_ms: 1,
        }
    }
}

/// Top-level engine configuration, loadable from `farmbot.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub latency: LatencyConfig,
    pub weather: WeatherConfig,
}

/// Weather refresh tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Interval between temporal-context refreshes, in seconds.
    pub refresh_secs: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self { refresh_secs: 300 }
    }
}

impl WeatherConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs.max(1))
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_documented_formula() {
        let config = EngineConfig::default();
        assert_eq!(config.latency.thinking_base_ms, 1000);
        assert_eq!(config.latency.thinking_per_char_ms, 20);
        assert_eq!(config.latency.analysis_min_ms, 2000);
        assert_eq!(config.latency.analysis_max_ms, 3000);
        assert_eq!(config.weather.refresh_secs, 300);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = EngineConfig::load_or_default(Path::new("/nonexistent/farmbot.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[latency]\nthinking_base_ms = 5\n\n[weather]\nrefresh_secs = 60").unwrap();

        let config = EngineConfig::load_or_default(file.path()).unwrap();
        assert_eq!(config.latency.thinking_base_ms, 5);
        assert_eq!(config.latency.thinking_per_char_ms, 20);
        assert_eq!(config.weather.refresh_secs, 60);
    }

    #[test]
    fn invalid_toml_is_a_serialization_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "latency = \"oops\"").unwrap();

        let err = EngineConfig::load_or_default(file.path()).unwrap_err();
        assert!(matches!(
            err,
            crate::error::FarmbotError::Serialization { .. }
        ));
    }
}
