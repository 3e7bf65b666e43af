use thiserror::Error;

/// Errors returned by line record parsing.
///
/// # Examples
/// ```
/// use sensorwire_core::protocols::line::error::LineError;
///
/// let err = LineError::UnrecognizedFormat { len: 3 };
/// assert!(err.to_string().contains("unrecognized line format"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LineError {
    #[error("unrecognized line format ({len} bytes)")]
    UnrecognizedFormat { len: usize },
    #[error("malformed {field} field: {text:?}")]
    MalformedNumber { field: &'static str, text: String },
}
