//! Application orchestration for the vayu-sense daemon
//!
//! Owns the process-wide state: the sensor driver, the reading server,
//! and the shutdown flag. Initialization is leaves-first and any failure
//! there is fatal; once running, per-session faults only close the
//! affected session.

use crate::bus::I2cBus;
use crate::config::AppConfig;
use crate::error::Result;
use crate::server::ReadingServer;
use crate::sht21::Sht21;
use log::{debug, error, info, warn};
use signal_hook::consts::{SIGINT, SIGTERM};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide aggregate of the daemon's resources
///
/// Torn down exactly once: [`App::shutdown`] releases each handle
/// through `Option::take`, so the normal unwind and `Drop` can both
/// reach it safely.
pub struct App {
    sensor: Option<Sht21<I2cBus>>,
    server: Option<ReadingServer>,
    /// Shutdown flag - written only by the signal handlers
    shutdown: Arc<AtomicBool>,
}

impl App {
    /// Initialize the sensor, the listener, and signal handling
    ///
    /// Any failure here aborts startup; nothing is retried.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let shutdown = Arc::new(AtomicBool::new(false));

        // The handlers only flip the flag; teardown happens in run()
        signal_hook::flag::register(SIGINT, Arc::clone(&shutdown))?;
        signal_hook::flag::register(SIGTERM, Arc::clone(&shutdown))?;

        info!(
            "Initializing SHT21 on I2C bus {} at address {:#04x}",
            config.sensor.bus, config.sensor.address
        );
        let bus = I2cBus::open(config.sensor.bus, config.sensor.address)?;
        let mut sensor = Sht21::new(bus);
        sensor.init()?;

        info!("Binding reading server on {}", config.server.bind_address);
        let server = ReadingServer::bind(
            &config.server.bind_address,
            config.server.poll_interval(),
            Arc::clone(&shutdown),
        )?;

        info!("✓ Sensor and server initialized");

        Ok(Self {
            sensor: Some(sensor),
            server: Some(server),
            shutdown,
        })
    }

    /// Accept and serve clients until shutdown is requested
    ///
    /// One session at a time; further connections wait in the OS backlog
    /// until the current session ends.
    pub fn run(&mut self) -> Result<()> {
        info!("Serving readings. Press Ctrl-C to stop.");

        loop {
            let Some(server) = self.server.as_ref() else {
                break;
            };
            let Some(sensor) = self.sensor.as_mut() else {
                break;
            };

            match server.accept() {
                Ok(None) => break, // shutdown requested
                Ok(Some((stream, peer))) => {
                    info!("Client connected: {}", peer);
                    if let Err(e) = server.serve(stream, peer, sensor) {
                        warn!("Session with {} aborted: {}", peer, e);
                    }
                }
                Err(e) => {
                    error!("Accept error: {}", e);
                }
            }
        }

        info!("Shutdown requested, closing resources");
        self.shutdown();
        Ok(())
    }

    /// Release the listening socket and the sensor handle
    ///
    /// Safe to call more than once; each handle is closed at most once.
    pub fn shutdown(&mut self) {
        if let Some(server) = self.server.take() {
            drop(server);
            debug!("Listening socket closed");
        }
        if let Some(sensor) = self.sensor.take() {
            drop(sensor);
            debug!("Sensor handle closed");
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        self.shutdown();
    }
}
