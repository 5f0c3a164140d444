//! Error types for the compass application

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The I2C adapter could not be opened
    #[error("failed to open I2C bus {path}: {source}")]
    BusOpen {
        path: String,
        #[source]
        source: i2cdev::linux::LinuxI2CError,
    },

    /// A write during sensor initialization failed; fatal, the read cycle
    /// never starts
    #[error("sensor initialization failed: {0}")]
    Init(String),

    /// A bus transaction failed during the poll cycle
    #[error("sensor read failed: {0}")]
    Read(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
