//! Pointer Injection Error Types

use thiserror::Error;

/// Result type for pointer operations
pub type Result<T> = std::result::Result<T, PointerError>;

/// Pointer module error types
#[derive(Error, Debug)]
pub enum PointerError {
    /// Backend could not be constructed (no usable display session)
    #[error("pointer backend unavailable: {0}")]
    Unavailable(String),

    /// An injection call failed; the frame loop logs and continues
    #[error("pointer injection failed: {0}")]
    Injection(String),

    /// Primary display bounds could not be determined
    #[error("screen bounds unavailable: {0}")]
    ScreenQuery(String),
}
