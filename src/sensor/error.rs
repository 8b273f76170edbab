//! Sensor Error Types
//!
//! Error handling for the sensor acquisition and frame delivery module.

use thiserror::Error;

/// Result type for sensor operations
pub type Result<T> = std::result::Result<T, SensorError>;

/// Sensor module error types
#[derive(Error, Debug)]
pub enum SensorError {
    /// No sensor source is configured or the configured source does not exist
    ///
    /// This is the one terminal startup error: without a source there is
    /// nothing to track and the program performs no further action.
    #[error("no sensor source available")]
    NoSensorAvailable,

    /// Malformed stream header line
    #[error("malformed capture header: {0}")]
    Header(String),

    /// Session operation attempted before `open()`
    #[error("sensor session is not open")]
    NotOpen,

    /// Session operation attempted after `close()`
    #[error("sensor session already closed")]
    Closed,

    /// IO error on the sensor source
    #[error("sensor source IO error: {0}")]
    Io(#[from] std::io::Error),
}
