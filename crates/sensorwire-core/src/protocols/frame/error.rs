use thiserror::Error;

/// Errors returned while locating a frame in a byte buffer.
///
/// # Examples
/// ```
/// use sensorwire_core::protocols::frame::error::FrameError;
///
/// let err = FrameError::InsufficientBytes { needed: 9, actual: 4 };
/// assert!(err.to_string().contains("need 9 bytes"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("insufficient bytes: need {needed} bytes, got {actual}")]
    InsufficientBytes { needed: usize, actual: usize },
    #[error("no frame sync marker (0x2C 0xE4) in {scanned} bytes")]
    FrameNotFound { scanned: usize },
}
