//! I2C bus implementation

use super::SensorBus;
use crate::error::Result;
use rppal::i2c::I2c;

/// I2C bus bound to a fixed slave address
pub struct I2cBus {
    i2c: I2c,
}

impl I2cBus {
    /// Open an I2C bus and bind the slave address
    ///
    /// # Arguments
    /// * `bus` - Kernel bus number (1 maps to "/dev/i2c-1")
    /// * `address` - 7-bit slave address (e.g., 0x40)
    pub fn open(bus: u8, address: u8) -> Result<Self> {
        let mut i2c = I2c::with_bus(bus)?;
        i2c.set_slave_address(address as u16)?;

        log::info!("Opened I2C bus {} at address {:#04x}", bus, address);

        Ok(I2cBus { i2c })
    }
}

impl SensorBus for I2cBus {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        Ok(self.i2c.read(buffer)?)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        Ok(self.i2c.write(data)?)
    }
}
