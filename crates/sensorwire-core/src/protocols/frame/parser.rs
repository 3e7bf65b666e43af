use serde::Serialize;

use super::layout;
use super::locator::SensorFrame;
use super::reader::FrameReader;
use crate::quantity::{Quantity, Readings};

/// Checksum byte that did not match the sum of the first eight bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChecksumMismatch {
    pub expected: u8,
    pub received: u8,
}

/// Concentrations decoded from one frame, in mg/m³.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameRecord {
    pub tvoc_mg_m3: f32,
    pub ch2o_mg_m3: f32,
    pub co2_mg_m3: f32,
    /// A frame was located and long enough to decode. Independent of the
    /// checksum outcome.
    pub valid: bool,
    /// Milliseconds on the monitor clock when the frame was decoded.
    pub timestamp: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum_mismatch: Option<ChecksumMismatch>,
}

impl FrameRecord {
    pub fn checksum_ok(&self) -> bool {
        self.checksum_mismatch.is_none()
    }
}

impl Readings for FrameRecord {
    fn readings(&self) -> Vec<(Quantity, f32)> {
        vec![
            (Quantity::Tvoc, self.tvoc_mg_m3),
            (Quantity::Ch2o, self.ch2o_mg_m3),
            (Quantity::Co2, self.co2_mg_m3),
        ]
    }
}

/// Decode a located frame.
///
/// Never fails: a checksum mismatch is logged and recorded on the returned
/// record, and the concentrations are decoded regardless.
pub fn parse_frame(frame: &SensorFrame, timestamp: u64) -> FrameRecord {
    let reader = FrameReader::new(frame.as_bytes());

    let expected = reader.expected_checksum();
    let received = reader.received_checksum();
    let checksum_mismatch = if expected == received {
        None
    } else {
        tracing::warn!(expected, received, "frame checksum mismatch, decoding anyway");
        Some(ChecksumMismatch { expected, received })
    };

    FrameRecord {
        tvoc_mg_m3: reader.read_milli(layout::TVOC_RANGE),
        ch2o_mg_m3: reader.read_milli(layout::CH2O_RANGE),
        co2_mg_m3: reader.read_milli(layout::CO2_RANGE),
        valid: true,
        timestamp,
        checksum_mismatch,
    }
}
