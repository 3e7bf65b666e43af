use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{ByteSource, SourceError};

/// Raw byte capture of a serial link, replayed from a file.
///
/// The capture holds exactly the bytes seen on the wire, with no framing or
/// timing metadata. The source closes once the last byte has been read.
pub struct CaptureFileSource {
    reader: BufReader<File>,
    remaining: u64,
}

impl CaptureFileSource {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        let remaining = file.metadata()?.len();
        Ok(Self {
            reader: BufReader::new(file),
            remaining,
        })
    }
}

impl ByteSource for CaptureFileSource {
    fn available(&mut self) -> Result<usize, SourceError> {
        Ok(usize::try_from(self.remaining).unwrap_or(usize::MAX))
    }

    fn read_byte(&mut self) -> Result<u8, SourceError> {
        if self.remaining == 0 {
            return Err(SourceError::Empty);
        }
        let mut byte = [0u8; 1];
        self.reader.read_exact(&mut byte)?;
        self.remaining -= 1;
        Ok(byte[0])
    }

    fn is_closed(&self) -> bool {
        self.remaining == 0
    }
}
