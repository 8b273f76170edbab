//! Translation Error Types

use thiserror::Error;

/// Result type for translation setup
pub type Result<T> = std::result::Result<T, TranslateError>;

/// Translation module error types
///
/// These only occur at construction time; the per-frame path skips bad
/// data silently instead of erroring.
#[derive(Error, Debug)]
pub enum TranslateError {
    /// Depth frame dimensions would make the rescale divide by zero
    #[error("depth frame dimensions must be nonzero, got {0}x{1}")]
    InvalidFrameSize(u32, u32),

    /// Screen bounds would collapse the rescale
    #[error("screen bounds must be nonzero, got {0}x{1}")]
    InvalidScreenBounds(u32, u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TranslateError::InvalidFrameSize(0, 424);
        assert_eq!(
            err.to_string(),
            "depth frame dimensions must be nonzero, got 0x424"
        );
    }
}
