use crate::protocols::frame::error::FrameError;
use crate::protocols::frame::layout::FRAME_LEN;
use crate::protocols::frame::{SensorFrame, locate_frame};

/// Bounded window of raw bytes from the frame link.
///
/// Bytes that can no longer start a frame are dropped: noise before a found
/// frame, everything but the last `FRAME_LEN - 1` bytes after a failed scan,
/// and the oldest bytes when the capacity is exceeded.
#[derive(Debug)]
pub struct FrameWindow {
    bytes: Vec<u8>,
    capacity: usize,
    dropped_bytes: u64,
}

impl FrameWindow {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(FRAME_LEN);
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
            dropped_bytes: 0,
        }
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
        if self.bytes.len() > self.capacity {
            let excess = self.bytes.len() - self.capacity;
            self.drop_front(excess);
        }
    }

    /// Remove and return the earliest complete frame.
    pub fn next_frame(&mut self) -> Result<SensorFrame, FrameError> {
        match locate_frame(&self.bytes) {
            Ok(located) => {
                self.dropped_bytes += located.offset as u64;
                self.bytes.drain(..located.end());
                Ok(located.frame)
            }
            Err(err @ FrameError::FrameNotFound { .. }) => {
                let keep = FRAME_LEN - 1;
                let excess = self.bytes.len().saturating_sub(keep);
                self.drop_front(excess);
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Drop everything, e.g. after a timed-out read.
    pub fn clear(&mut self) {
        let len = self.bytes.len();
        self.drop_front(len);
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn dropped_bytes(&self) -> u64 {
        self.dropped_bytes
    }

    pub fn reset(&mut self) {
        self.bytes.clear();
        self.dropped_bytes = 0;
    }

    fn drop_front(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        tracing::debug!(count, "dropping bytes from frame window");
        self.bytes.drain(..count);
        self.dropped_bytes += count as u64;
    }
}
