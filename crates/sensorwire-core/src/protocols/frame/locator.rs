use super::error::FrameError;
use super::layout;

/// Nine raw bytes starting at a sync marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorFrame {
    bytes: [u8; layout::FRAME_LEN],
}

impl SensorFrame {
    pub fn new(bytes: [u8; layout::FRAME_LEN]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; layout::FRAME_LEN] {
        &self.bytes
    }
}

/// Frame found in a buffer, with the offset of its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedFrame {
    pub offset: usize,
    pub frame: SensorFrame,
}

impl LocatedFrame {
    /// Offset one past the last frame byte.
    pub fn end(&self) -> usize {
        self.offset + layout::FRAME_LEN
    }
}

/// Find the earliest complete frame in `buffer`.
///
/// The protocol has no length field; synchronization relies only on the
/// `0x2C 0xE4` marker. Only offsets with a full frame behind them are
/// scanned, so a marker close to the end of the buffer is reported as
/// [`FrameError::FrameNotFound`] until more bytes arrive.
pub fn locate_frame(buffer: &[u8]) -> Result<LocatedFrame, FrameError> {
    if buffer.len() < layout::FRAME_LEN {
        return Err(FrameError::InsufficientBytes {
            needed: layout::FRAME_LEN,
            actual: buffer.len(),
        });
    }

    let offset = buffer
        .windows(layout::FRAME_LEN)
        .position(|candidate| candidate[..layout::SYNC_MARKER.len()] == layout::SYNC_MARKER)
        .ok_or(FrameError::FrameNotFound {
            scanned: buffer.len(),
        })?;

    let mut bytes = [0u8; layout::FRAME_LEN];
    bytes.copy_from_slice(&buffer[offset..offset + layout::FRAME_LEN]);
    Ok(LocatedFrame {
        offset,
        frame: SensorFrame::new(bytes),
    })
}
