use super::error::LineError;
use super::layout;
use crate::protocols::common::reader::{parse_decimal_prefix, utf8_prefix};

/// Field access over the raw bytes of one line. Offsets are byte offsets.
pub struct LineReader<'a> {
    line: &'a [u8],
}

impl<'a> LineReader<'a> {
    pub fn new(line: &'a [u8]) -> Self {
        Self { line }
    }

    pub fn require_record(&self) -> Result<(), LineError> {
        if !self.line.starts_with(layout::RECORD_MARKER) || self.line.len() < layout::MIN_LINE_LEN
        {
            return Err(LineError::UnrecognizedFormat {
                len: self.line.len(),
            });
        }
        Ok(())
    }

    pub fn read_field(&self, range: std::ops::Range<usize>) -> Option<&'a [u8]> {
        self.line.get(range)
    }

    pub fn read_decimal(
        &self,
        field: &'static str,
        range: std::ops::Range<usize>,
    ) -> Result<f32, LineError> {
        let raw = self.read_field(range).unwrap_or_default();
        parse_decimal_prefix(utf8_prefix(raw)).ok_or_else(|| LineError::MalformedNumber {
            field,
            text: String::from_utf8_lossy(raw).into_owned(),
        })
    }
}
