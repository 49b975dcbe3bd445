//! Local sensor readout
//!
//! Polls the SHT21 directly and prints one reading per second to stdout,
//! without the network layer. Useful for checking wiring before starting
//! the daemon.
//!
//! Usage:
//! ```bash
//! RUST_LOG=info cargo run --example local_readout
//! ```

use std::thread;
use std::time::Duration;
use vayu_sense::{I2cBus, Sht21, format_reading};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    log::info!("Opening I2C bus 1, sensor at 0x40");
    let bus = I2cBus::open(1, 0x40)?;
    let mut sensor = Sht21::new(bus);
    sensor.init()?;
    log::info!("Sensor ready, polling every second");

    loop {
        let reading = sensor.sample()?;
        print!("{}", format_reading(&reading));
        thread::sleep(Duration::from_secs(1));
    }
}
