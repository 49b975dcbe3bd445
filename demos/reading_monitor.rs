//! Passive reading monitor
//!
//! Connects to a running vayu-sense daemon and prints every streamed
//! line to stdout. Sends nothing; exits when the server closes the
//! connection.
//!
//! Usage:
//! ```bash
//! cargo run --example reading_monitor -- 192.168.1.50:9000
//! ```

use std::env;
use std::io::{BufRead, BufReader};
use std::net::TcpStream;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let addr = env::args()
        .nth(1)
        .unwrap_or_else(|| "127.0.0.1:9000".to_string());

    log::info!("Connecting to {}", addr);
    let stream = TcpStream::connect(&addr)?;
    log::info!("Connected, waiting for readings");

    let reader = BufReader::new(stream);
    for line in reader.lines() {
        println!("{}", line?);
    }

    log::info!("Server closed the connection");
    Ok(())
}
