//! Byte sources feeding the decode pipeline.
//!
//! A [`ByteSource`] is the only contact point with a serial link: the core
//! asks how many bytes are ready and pulls them one at a time. Port setup is
//! left to the caller. Timing lives in [`clock`] and [`burst`] so deadline
//! logic can be driven without real time passing.

pub mod burst;
mod capture;
pub mod clock;
mod memory;

pub use capture::CaptureFileSource;
pub use memory::MemorySource;

use thiserror::Error;

pub trait ByteSource {
    /// Number of bytes that can be read without waiting.
    fn available(&mut self) -> Result<usize, SourceError>;

    /// Pull the next byte. Callers check [`ByteSource::available`] first.
    fn read_byte(&mut self) -> Result<u8, SourceError>;

    /// True once the source can never produce more bytes (end of a capture).
    /// Live links stay open.
    fn is_closed(&self) -> bool {
        false
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn available(&mut self) -> Result<usize, SourceError> {
        (**self).available()
    }

    fn read_byte(&mut self) -> Result<u8, SourceError> {
        (**self).read_byte()
    }

    fn is_closed(&self) -> bool {
        (**self).is_closed()
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("read from an empty byte source")]
    Empty,
}
