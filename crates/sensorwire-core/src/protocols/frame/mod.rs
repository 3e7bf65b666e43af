//! Binary frame protocol decoding (TVOC / CH₂O / CO₂ module).
//!
//! Frames are nine bytes: address `0x2C`, function `0xE4`, three big-endian
//! u16 concentrations in 0.001 mg/m³, and a checksum equal to the low byte of
//! the sum of the first eight bytes. There is no length field, so the locator
//! resynchronizes on the two-byte marker alone and the earliest match wins.
//!
//! A checksum mismatch does not fail the parse; it is attached to the record
//! and the caller decides whether to gate on it.

pub mod error;
pub mod layout;
pub mod locator;
pub mod parser;
pub mod reader;

pub use locator::{LocatedFrame, SensorFrame, locate_frame};
pub use parser::{ChecksumMismatch, FrameRecord, parse_frame};
