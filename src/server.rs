//! TCP reading server
//!
//! Streams formatted sensor readings to one client at a time. A session
//! is a plain producer loop: sample, format one line, send, wait out the
//! poll interval, repeat. Sessions end on client disconnect, sensor
//! fault, or shutdown; the listener itself survives everything except
//! shutdown. Clients never send anything, and nothing they do send is
//! read.

use crate::bus::SensorBus;
use crate::error::{Error, Result};
use crate::sht21::{Reading, Sht21};
use log::{debug, info};
use std::io::Write;
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Sleep slice between accept polls (keeps connection acceptance responsive)
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(10);
/// Upper bound on a single throttle sleep, so shutdown is noticed promptly
const THROTTLE_SLICE: Duration = Duration::from_millis(50);

/// TCP server streaming readings to a single client at a time
pub struct ReadingServer {
    listener: TcpListener,
    poll_interval: Duration,
    shutdown: Arc<AtomicBool>,
}

impl ReadingServer {
    /// Bind the listening socket
    ///
    /// The listener is put in non-blocking mode so [`ReadingServer::accept`]
    /// can watch the shutdown flag between poll slices. `TcpListener::bind`
    /// sets `SO_REUSEADDR` on Unix, so a restarted daemon can rebind
    /// immediately.
    pub fn bind(addr: &str, poll_interval: Duration, shutdown: Arc<AtomicBool>) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .map_err(|e| Error::Other(format!("Failed to bind to {}: {}", addr, e)))?;
        listener.set_nonblocking(true)?;

        Ok(Self {
            listener,
            poll_interval,
            shutdown,
        })
    }

    /// Local address of the listening socket
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Wait for the next client
    ///
    /// Returns `Ok(None)` once the shutdown flag is set; that is the
    /// normal way out, not an error. The accepted stream is switched back
    /// to blocking mode for the session loop.
    pub fn accept(&self) -> Result<Option<(TcpStream, SocketAddr)>> {
        loop {
            if self.shutdown.load(Ordering::Relaxed) {
                return Ok(None);
            }

            match self.listener.accept() {
                Ok((stream, addr)) => {
                    stream.set_nonblocking(false)?;
                    return Ok(Some((stream, addr)));
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    // No connection pending, sleep briefly
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Drive one client session until disconnect, sensor fault, or shutdown
    ///
    /// A line is sent only after both measurements succeed; partial
    /// readings are never transmitted. Send failures end the session
    /// cleanly (logged here, `Ok` returned). Sensor faults close the
    /// session and propagate so the accept loop can log them and resume.
    pub fn serve<B: SensorBus>(
        &self,
        mut stream: TcpStream,
        peer: SocketAddr,
        sensor: &mut Sht21<B>,
    ) -> Result<()> {
        info!("Streaming readings to {}", peer);
        let mut lines_sent: u64 = 0;

        loop {
            if self.shutdown.load(Ordering::Relaxed) {
                debug!("Shutdown flag set, closing session");
                break;
            }

            let cycle_start = Instant::now();

            let reading = match sensor.sample() {
                Ok(reading) => reading,
                Err(e) => {
                    let _ = stream.shutdown(Shutdown::Both);
                    return Err(e);
                }
            };

            let line = format_reading(&reading);
            if let Err(e) = stream.write_all(line.as_bytes()) {
                info!("Client {} disconnected: {}", peer, e);
                break;
            }
            lines_sent += 1;

            self.throttle(cycle_start);
        }

        let _ = stream.shutdown(Shutdown::Both);
        info!("Session with {} closed after {} lines", peer, lines_sent);
        Ok(())
    }

    /// Deadline-based wait between poll iterations
    ///
    /// Sleeps toward `cycle_start + poll_interval` in bounded slices so a
    /// pending shutdown is observed within one slice instead of after the
    /// full interval.
    fn throttle(&self, cycle_start: Instant) {
        let deadline = cycle_start + self.poll_interval;
        while !self.shutdown.load(Ordering::Relaxed) {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            thread::sleep(remaining.min(THROTTLE_SLICE));
        }
    }
}

/// Format a reading as its single-line wire representation
///
/// One line per poll iteration, both fields at two decimals:
/// `Temperature: <t>°C, Humidity: <h>%\n`
pub fn format_reading(reading: &Reading) -> String {
    format!(
        "Temperature: {:.2}°C, Humidity: {:.2}%\n",
        reading.temperature_c, reading.humidity_rh
    )
}
