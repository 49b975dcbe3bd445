//! vayu-sense - ambient sensor streaming daemon
//!
//! Polls an SHT21 temperature/humidity sensor over I2C and streams one
//! formatted reading per poll interval to a single TCP client at a time.
//! Clients are served strictly serially; a termination signal unwinds
//! the accept and session loops cooperatively.

use std::env;
use std::path::Path;
use vayu_sense::{App, AppConfig, Result};

/// Parse config path from command line arguments.
///
/// Supports:
/// - `vayu-sense <path>` (positional)
/// - `vayu-sense --config <path>` (flag-based)
/// - `vayu-sense -c <path>` (short flag)
///
/// Defaults to `/etc/vayu-sense.toml` if not specified.
fn parse_config_path() -> String {
    let args: Vec<String> = env::args().collect();

    // Look for --config or -c flag
    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }

    // Fall back to first positional argument (if it doesn't start with -)
    if args.len() > 1 && !args[1].starts_with('-') {
        return args[1].clone();
    }

    // Default path
    "/etc/vayu-sense.toml".to_string()
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("vayu-sense v0.1.0 starting...");

    // Hardware addressing and the poll interval are fixed configuration,
    // loaded once at startup; the only accepted argument is a config path.
    let config_path = parse_config_path();
    let config = if Path::new(&config_path).exists() {
        log::info!("Using config: {}", config_path);
        AppConfig::from_file(&config_path)?
    } else {
        log::info!("Config {} not found, using defaults", config_path);
        AppConfig::default()
    };

    let mut app = App::new(&config)?;
    app.run()?;

    log::info!("vayu-sense stopped");
    Ok(())
}
