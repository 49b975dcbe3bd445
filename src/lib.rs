//! vayu-sense - ambient sensor streaming library
//!
//! Reads an SHT21-family temperature/humidity sensor over I2C and exposes
//! the readings as a line-oriented TCP stream, one client at a time.
//!
//! ## Layout
//!
//! - [`bus`]: byte-level sensor bus abstraction (hardware and mock)
//! - [`sht21`]: sensor protocol driver and conversion math
//! - [`server`]: single-session TCP reading server
//! - [`app`]: daemon orchestration and graceful shutdown

pub mod app;
pub mod bus;
pub mod config;
pub mod error;
pub mod server;
pub mod sht21;

// Re-export commonly used types
pub use app::App;
pub use bus::{I2cBus, SensorBus};
pub use config::AppConfig;
pub use error::{Error, Result};
pub use server::{ReadingServer, format_reading};
pub use sht21::{MeasurementKind, Reading, Sht21};
