//! Error types for vayu-sense

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// vayu-sense error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I2C bus error
    #[error("I2C bus error: {0}")]
    I2c(#[from] rppal::i2c::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration parse error
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Bus transfer moved fewer bytes than the protocol requires
    #[error("Short transfer: expected {expected} bytes, got {actual}")]
    ShortTransfer {
        /// Bytes the transfer had to move
        expected: usize,
        /// Bytes actually moved
        actual: usize,
    },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
