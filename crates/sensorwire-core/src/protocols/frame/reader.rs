use super::layout;
use crate::protocols::common::reader::wrapping_sum;

/// Field access over a located frame.
///
/// Ranges come from `layout`, and the backing array is always
/// [`layout::FRAME_LEN`] bytes, so reads cannot fail.
pub struct FrameReader<'a> {
    bytes: &'a [u8; layout::FRAME_LEN],
}

impl<'a> FrameReader<'a> {
    pub fn new(bytes: &'a [u8; layout::FRAME_LEN]) -> Self {
        Self { bytes }
    }

    pub fn read_u8(&self, offset: usize) -> u8 {
        self.bytes[offset]
    }

    pub fn read_u16_be(&self, range: std::ops::Range<usize>) -> u16 {
        u16::from_be_bytes([self.bytes[range.start], self.bytes[range.start + 1]])
    }

    /// Read a big-endian field and scale it to mg/m³.
    pub fn read_milli(&self, range: std::ops::Range<usize>) -> f32 {
        f32::from(self.read_u16_be(range)) / layout::MILLI_SCALE
    }

    pub fn expected_checksum(&self) -> u8 {
        wrapping_sum(&self.bytes[layout::CHECKSUM_SPAN])
    }

    pub fn received_checksum(&self) -> u8 {
        self.read_u8(layout::CHECKSUM_OFFSET)
    }
}
