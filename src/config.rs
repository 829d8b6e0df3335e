//! Configuration for the sensor monitor
//!
//! Runtime configuration is loaded from a JSON file so the port, refresh
//! cadence, and window sizing can be adjusted without recompilation. Any
//! read or parse failure falls back to the built-in defaults with a
//! warning, keeping the monitor usable out of the box.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default config file path relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "assets/monitor_config.json";

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub serial: SerialConfig,
    pub buffer: BufferConfig,
    pub display: DisplayConfig,
}

/// Serial transport parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SerialConfig {
    /// Port identifier, e.g. "COM3" or "/dev/ttyUSB0"
    pub port: String,
    /// Line rate in baud
    pub baud_rate: u32,
    /// Read timeout in milliseconds; bounds one acquisition attempt and
    /// doubles as the stop-flag poll interval
    pub read_timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: "COM3".to_string(),
            baud_rate: 115_200,
            read_timeout_ms: 100,
        }
    }
}

/// Sample window and handoff sizing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BufferConfig {
    /// Rolling-window capacity (samples kept for the chart)
    pub capacity: usize,
    /// Capacity of the reader -> UI sample ring
    pub channel_capacity: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            channel_capacity: 64,
        }
    }
}

/// Display refresh and presentation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Refresh period in milliseconds (one tick per period)
    pub refresh_interval_ms: u64,
    /// Fixed lower bound of the chart's vertical axis
    pub value_floor: i32,
    /// Fixed upper bound of the chart's vertical axis (10-bit ADC)
    pub value_ceiling: i32,
    /// Threshold in effect at startup
    pub default_threshold: i32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: 50,
            value_floor: 0,
            value_ceiling: 1023,
            default_threshold: 512,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            serial: SerialConfig::default(),
            buffer: BufferConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file, falling back to defaults on
    /// any read or parse failure
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.serial.read_timeout_ms)
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.display.refresh_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.serial.port, "COM3");
        assert_eq!(config.serial.baud_rate, 115_200);
        assert_eq!(config.buffer.capacity, 100);
        assert_eq!(config.display.refresh_interval_ms, 50);
        assert_eq!(config.display.value_ceiling, 1023);
        assert_eq!(config.display.default_threshold, 512);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = AppConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.serial.port, config.serial.port);
        assert_eq!(parsed.buffer.capacity, config.buffer.capacity);
        assert_eq!(
            parsed.display.default_threshold,
            config.display.default_threshold
        );
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_from_file("does/not/exist.json");
        assert_eq!(config.serial.baud_rate, AppConfig::default().serial.baud_rate);
    }

    #[test]
    fn test_durations() {
        let config = AppConfig::default();
        assert_eq!(config.read_timeout(), Duration::from_millis(100));
        assert_eq!(config.refresh_interval(), Duration::from_millis(50));
    }
}
