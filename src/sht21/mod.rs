//! SHT21 temperature/humidity sensor driver
//!
//! Hold-mode protocol: a single command byte triggers a measurement, the
//! sensor holds the bus while converting, and the result is read back as
//! two data bytes plus a checksum byte. The driver is generic over
//! [`SensorBus`] so the protocol logic runs against real hardware or a
//! mock in tests.

pub mod protocol;

use crate::bus::SensorBus;
use crate::error::{Error, Result};
use log::{debug, info};
use std::thread;
use std::time::Duration;

/// Measurement selector for the two hold-mode trigger commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementKind {
    /// 14-bit temperature measurement
    Temperature,
    /// 12-bit relative humidity measurement
    Humidity,
}

impl MeasurementKind {
    /// Trigger opcode for this measurement
    pub fn command(self) -> u8 {
        match self {
            MeasurementKind::Temperature => protocol::CMD_MEASURE_TEMP_HOLD,
            MeasurementKind::Humidity => protocol::CMD_MEASURE_HUMIDITY_HOLD,
        }
    }

    /// Worst-case conversion time before the response is ready
    pub fn delay(self) -> Duration {
        match self {
            MeasurementKind::Temperature => protocol::TEMP_MEASURE_DELAY,
            MeasurementKind::Humidity => protocol::HUMIDITY_MEASURE_DELAY,
        }
    }
}

/// One converted sensor sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    /// Temperature in degrees Celsius
    pub temperature_c: f64,
    /// Relative humidity in percent
    pub humidity_rh: f64,
}

/// SHT21 driver over a byte-level sensor bus
pub struct Sht21<B: SensorBus> {
    bus: B,
}

impl<B: SensorBus> Sht21<B> {
    /// Create a driver over an open bus
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    /// Soft-reset the sensor and wait for it to settle
    ///
    /// Must complete once after power-up, before the first measurement.
    pub fn init(&mut self) -> Result<()> {
        self.write_command(protocol::CMD_SOFT_RESET)?;
        thread::sleep(protocol::SOFT_RESET_SETTLE);
        info!("SHT21 soft reset complete");
        Ok(())
    }

    /// Trigger a hold-mode measurement and return the masked raw counts
    ///
    /// Blocks for the measurement's worst-case conversion time between
    /// the trigger write and the response read. Fails with
    /// [`Error::ShortTransfer`] when either direction moves fewer bytes
    /// than the protocol requires.
    pub fn measure_raw(&mut self, kind: MeasurementKind) -> Result<u16> {
        self.write_command(kind.command())?;
        thread::sleep(kind.delay());

        let mut response = [0u8; protocol::RESPONSE_LEN];
        let n = self.bus.read(&mut response)?;
        if n != protocol::RESPONSE_LEN {
            return Err(Error::ShortTransfer {
                expected: protocol::RESPONSE_LEN,
                actual: n,
            });
        }

        // response[2] is the CRC byte, not verified
        let raw = protocol::combine_raw(response[0], response[1]);
        debug!("{:?} raw counts: {:#06x}", kind, raw);
        Ok(raw)
    }

    /// Measure and convert temperature in degrees Celsius
    pub fn read_temperature(&mut self) -> Result<f64> {
        let raw = self.measure_raw(MeasurementKind::Temperature)?;
        Ok(protocol::convert_temperature(raw))
    }

    /// Measure and convert relative humidity in percent
    pub fn read_humidity(&mut self) -> Result<f64> {
        let raw = self.measure_raw(MeasurementKind::Humidity)?;
        Ok(protocol::convert_humidity(raw))
    }

    /// Take one full sample, temperature first, then humidity
    pub fn sample(&mut self) -> Result<Reading> {
        let temperature_c = self.read_temperature()?;
        let humidity_rh = self.read_humidity()?;
        Ok(Reading {
            temperature_c,
            humidity_rh,
        })
    }

    fn write_command(&mut self, command: u8) -> Result<()> {
        let n = self.bus.write(&[command])?;
        if n != 1 {
            return Err(Error::ShortTransfer {
                expected: 1,
                actual: n,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::MockBus;

    fn driver_with_response(response: &[u8]) -> (Sht21<MockBus>, MockBus) {
        let bus = MockBus::new();
        bus.inject_read(response);
        (Sht21::new(bus.clone()), bus)
    }

    #[test]
    fn test_init_sends_soft_reset() {
        let bus = MockBus::new();
        let mut sensor = Sht21::new(bus.clone());
        sensor.init().unwrap();
        assert_eq!(bus.get_written(), vec![protocol::CMD_SOFT_RESET]);
    }

    #[test]
    fn test_measure_writes_trigger_opcode() {
        let (mut sensor, bus) = driver_with_response(&[0x62, 0x98, 0x00]);
        let raw = sensor.measure_raw(MeasurementKind::Temperature).unwrap();
        assert_eq!(bus.get_written(), vec![protocol::CMD_MEASURE_TEMP_HOLD]);
        assert_eq!(raw, 0x6298);
    }

    #[test]
    fn test_measure_masks_status_bits() {
        let (mut sensor, _bus) = driver_with_response(&[0x5C, 0x03, 0xFF]);
        let raw = sensor.measure_raw(MeasurementKind::Humidity).unwrap();
        assert_eq!(raw, 0x5C00);
    }

    #[test]
    fn test_short_read_is_an_error() {
        let (mut sensor, _bus) = driver_with_response(&[0x62]);
        let err = sensor
            .measure_raw(MeasurementKind::Temperature)
            .unwrap_err();
        match err {
            Error::ShortTransfer { expected, actual } => {
                assert_eq!(expected, protocol::RESPONSE_LEN);
                assert_eq!(actual, 1);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_sample_orders_temperature_before_humidity() {
        let bus = MockBus::new();
        bus.inject_read(&[0x62, 0x98, 0x00]);
        bus.inject_read(&[0x5C, 0x00, 0x00]);
        let mut sensor = Sht21::new(bus.clone());

        let reading = sensor.sample().unwrap();

        assert_eq!(
            bus.get_written(),
            vec![
                protocol::CMD_MEASURE_TEMP_HOLD,
                protocol::CMD_MEASURE_HUMIDITY_HOLD
            ]
        );
        assert!((reading.temperature_c - 20.8254).abs() < 1e-3);
        assert!((reading.humidity_rh - 38.921875).abs() < 1e-9);
    }
}
