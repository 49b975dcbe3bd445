//! Sensor bus abstraction
//!
//! Separates the sensor protocol logic from the physical bus so the driver
//! can run against real hardware or a mock in tests.

use crate::error::Result;

mod i2c;
mod mock;
pub use i2c::I2cBus;
pub use mock::MockBus;

/// Bus trait for sensor communication
pub trait SensorBus: Send {
    /// Read data into buffer, returns number of bytes read
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Write data from buffer, returns number of bytes written
    fn write(&mut self, data: &[u8]) -> Result<usize>;
}
