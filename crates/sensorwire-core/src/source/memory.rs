use std::collections::VecDeque;

use super::{ByteSource, SourceError};

/// In-memory byte source.
///
/// An open source behaves like a live link that currently has no data;
/// [`MemorySource::from_bytes`] builds a closed replay of fixed bytes.
#[derive(Debug, Default)]
pub struct MemorySource {
    pending: VecDeque<u8>,
    closed: bool,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            pending: bytes.iter().copied().collect(),
            closed: true,
        }
    }

    pub fn push(&mut self, bytes: &[u8]) {
        self.pending.extend(bytes);
    }

    pub fn close(&mut self) {
        self.closed = true;
    }
}

impl ByteSource for MemorySource {
    fn available(&mut self) -> Result<usize, SourceError> {
        Ok(self.pending.len())
    }

    fn read_byte(&mut self) -> Result<u8, SourceError> {
        self.pending.pop_front().ok_or(SourceError::Empty)
    }

    fn is_closed(&self) -> bool {
        self.closed && self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::MemorySource;
    use crate::source::{ByteSource, SourceError};

    #[test]
    fn replay_closes_after_last_byte() {
        let mut source = MemorySource::from_bytes(&[1, 2]);
        assert_eq!(source.available().unwrap(), 2);
        assert!(!source.is_closed());
        assert_eq!(source.read_byte().unwrap(), 1);
        assert_eq!(source.read_byte().unwrap(), 2);
        assert!(source.is_closed());
        assert!(matches!(source.read_byte(), Err(SourceError::Empty)));
    }

    #[test]
    fn open_source_stays_open_when_drained() {
        let mut source = MemorySource::new();
        source.push(&[7]);
        assert_eq!(source.read_byte().unwrap(), 7);
        assert!(!source.is_closed());
        source.close();
        assert!(source.is_closed());
    }
}
