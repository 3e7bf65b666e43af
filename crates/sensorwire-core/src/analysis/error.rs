use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::validate::RangeError;
use crate::protocols::frame::ChecksumMismatch;
use crate::protocols::frame::error::FrameError;
use crate::protocols::line::error::LineError;
use crate::quantity::Quantity;

/// Failure of one candidate record. Never fatal: the record is dropped and
/// the monitor moves on to the next input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("unrecognized line format ({len} bytes)")]
    UnrecognizedFormat { len: usize },
    #[error("malformed {field} field: {text:?}")]
    MalformedNumber { field: &'static str, text: String },
    #[error("no frame sync marker in {scanned} bytes")]
    FrameNotFound { scanned: usize },
    #[error("insufficient bytes: need {needed} bytes, got {actual}")]
    InsufficientBytes { needed: usize, actual: usize },
    #[error("checksum mismatch: expected 0x{expected:02X}, received 0x{received:02X}")]
    ChecksumMismatch { expected: u8, received: u8 },
    #[error("{quantity} out of range: {value}")]
    OutOfRange { quantity: Quantity, value: f32 },
    #[error("no frame within {waited_ms} ms")]
    Timeout { waited_ms: u64 },
}

impl DecodeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecodeError::UnrecognizedFormat { .. } => ErrorKind::UnrecognizedFormat,
            DecodeError::MalformedNumber { .. } => ErrorKind::MalformedNumber,
            DecodeError::FrameNotFound { .. } => ErrorKind::FrameNotFound,
            DecodeError::InsufficientBytes { .. } => ErrorKind::InsufficientBytes,
            DecodeError::ChecksumMismatch { .. } => ErrorKind::ChecksumMismatch,
            DecodeError::OutOfRange { .. } => ErrorKind::OutOfRange,
            DecodeError::Timeout { .. } => ErrorKind::Timeout,
        }
    }
}

impl From<LineError> for DecodeError {
    fn from(value: LineError) -> Self {
        match value {
            LineError::UnrecognizedFormat { len } => DecodeError::UnrecognizedFormat { len },
            LineError::MalformedNumber { field, text } => {
                DecodeError::MalformedNumber { field, text }
            }
        }
    }
}

impl From<FrameError> for DecodeError {
    fn from(value: FrameError) -> Self {
        match value {
            FrameError::InsufficientBytes { needed, actual } => {
                DecodeError::InsufficientBytes { needed, actual }
            }
            FrameError::FrameNotFound { scanned } => DecodeError::FrameNotFound { scanned },
        }
    }
}

impl From<RangeError> for DecodeError {
    fn from(value: RangeError) -> Self {
        match value {
            RangeError::OutOfRange {
                quantity, value, ..
            } => DecodeError::OutOfRange { quantity, value },
        }
    }
}

impl From<ChecksumMismatch> for DecodeError {
    fn from(value: ChecksumMismatch) -> Self {
        DecodeError::ChecksumMismatch {
            expected: value.expected,
            received: value.received,
        }
    }
}

/// Error category used as the counting key in statistics and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnrecognizedFormat,
    MalformedNumber,
    FrameNotFound,
    InsufficientBytes,
    ChecksumMismatch,
    OutOfRange,
    Timeout,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::UnrecognizedFormat => "unrecognized_format",
            ErrorKind::MalformedNumber => "malformed_number",
            ErrorKind::FrameNotFound => "frame_not_found",
            ErrorKind::InsufficientBytes => "insufficient_bytes",
            ErrorKind::ChecksumMismatch => "checksum_mismatch",
            ErrorKind::OutOfRange => "out_of_range",
            ErrorKind::Timeout => "timeout",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{DecodeError, ErrorKind};
    use crate::protocols::frame::error::FrameError;
    use crate::protocols::line::error::LineError;

    #[test]
    fn protocol_errors_map_to_kinds() {
        let err: DecodeError = LineError::UnrecognizedFormat { len: 2 }.into();
        assert_eq!(err.kind(), ErrorKind::UnrecognizedFormat);

        let err: DecodeError = FrameError::FrameNotFound { scanned: 12 }.into();
        assert_eq!(err.kind(), ErrorKind::FrameNotFound);

        let err: DecodeError = FrameError::InsufficientBytes {
            needed: 9,
            actual: 3,
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::InsufficientBytes);
    }

    #[test]
    fn kinds_serialize_as_report_keys() {
        let json = serde_json::to_string(&ErrorKind::OutOfRange).unwrap();
        assert_eq!(json, "\"out_of_range\"");
        assert_eq!(ErrorKind::Timeout.to_string(), "timeout");
    }
}
