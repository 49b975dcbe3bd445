//! Configuration for the vayu-sense daemon
//!
//! Loads configuration from a TOML file with the minimal parameters needed
//! to reach the sensor and expose the reading stream.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub sensor: SensorConfig,
    pub server: ServerConfig,
}

/// Sensor bus configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SensorConfig {
    /// I2C bus number (1 maps to /dev/i2c-1)
    pub bus: u8,
    /// 7-bit slave address of the sensor
    pub address: u8,
}

/// TCP streaming configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// TCP bind address for the reading stream
    ///
    /// Examples:
    /// - `0.0.0.0:9000` - Bind to all interfaces on port 9000
    /// - `127.0.0.1:9000` - Localhost only
    pub bind_address: String,
    /// Delay between poll iterations within a session, in milliseconds
    pub poll_interval_ms: u64,
}

impl ServerConfig {
    /// Poll interval as a [`Duration`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    ///
    /// # Arguments
    /// - `path`: Path to TOML configuration file
    ///
    /// # Returns
    /// Parsed configuration or error
    ///
    /// # Example
    /// ```no_run
    /// use vayu_sense::config::AppConfig;
    ///
    /// let config = AppConfig::from_file("vayu-sense.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Default configuration for an SHT21 on the primary Raspberry Pi bus
    ///
    /// Suitable for testing and development. Production deployments
    /// should use a proper TOML configuration file.
    pub fn sht21_defaults() -> Self {
        Self {
            sensor: SensorConfig {
                bus: 1,
                address: 0x40,
            },
            server: ServerConfig {
                bind_address: "0.0.0.0:9000".to_string(),
                poll_interval_ms: 1000,
            },
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::sht21_defaults()
    }
}
