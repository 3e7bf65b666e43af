use super::layout;

/// Accumulates bytes from the ASCII link into complete lines.
///
/// `\n` and `\r` both terminate a line; empty lines are skipped so CRLF pairs
/// produce a single line. A buffer that grows past `max_len` without a
/// terminator is dropped and counted in [`LineDecoder::discarded_lines`].
#[derive(Debug)]
pub struct LineDecoder {
    buffer: Vec<u8>,
    max_len: usize,
    discarded_lines: u64,
}

impl LineDecoder {
    pub fn new(max_len: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(max_len + 1),
            max_len,
            discarded_lines: 0,
        }
    }

    /// Returns the raw bytes of a completed line, terminator excluded.
    pub fn feed(&mut self, byte: u8) -> Option<Vec<u8>> {
        match byte {
            layout::LINE_FEED | layout::CARRIAGE_RETURN => {
                if self.buffer.is_empty() {
                    return None;
                }
                Some(std::mem::take(&mut self.buffer))
            }
            _ => {
                self.buffer.push(byte);
                if self.buffer.len() > self.max_len {
                    tracing::debug!(
                        max_len = self.max_len,
                        "discarding overlong line without terminator"
                    );
                    self.buffer.clear();
                    self.discarded_lines += 1;
                }
                None
            }
        }
    }

    pub fn discarded_lines(&self) -> u64 {
        self.discarded_lines
    }

    /// Bytes buffered for the line currently being assembled.
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
        self.discarded_lines = 0;
    }
}

impl Default for LineDecoder {
    fn default() -> Self {
        Self::new(layout::DEFAULT_MAX_LINE_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::LineDecoder;

    fn feed_all(decoder: &mut LineDecoder, bytes: &[u8]) -> Vec<Vec<u8>> {
        bytes.iter().filter_map(|b| decoder.feed(*b)).collect()
    }

    #[test]
    fn emits_line_on_terminator() {
        let mut decoder = LineDecoder::default();
        let lines = feed_all(&mut decoder, b"R:070.0RH 032.4C\n");
        assert_eq!(lines, vec![b"R:070.0RH 032.4C".to_vec()]);
        assert_eq!(decoder.pending_len(), 0);
    }

    #[test]
    fn crlf_yields_single_line() {
        let mut decoder = LineDecoder::default();
        let lines = feed_all(&mut decoder, b"abc\r\ndef\r\n\r\n");
        assert_eq!(lines, vec![b"abc".to_vec(), b"def".to_vec()]);
    }

    #[test]
    fn overlong_input_is_discarded() {
        let mut decoder = LineDecoder::default();
        let noise = vec![b'x'; 150];
        let lines = feed_all(&mut decoder, &noise);
        assert!(lines.is_empty());
        assert_eq!(decoder.discarded_lines(), 1);
        assert!(decoder.pending_len() <= 100);

        // the partial tail after the discard still fits the bound
        let lines = feed_all(&mut decoder, b"\n");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].len() <= 100);
    }

    #[test]
    fn line_at_bound_is_kept() {
        let mut decoder = LineDecoder::new(4);
        let lines = feed_all(&mut decoder, b"abcd\nabcde\n");
        assert_eq!(lines, vec![b"abcd".to_vec()]);
        assert_eq!(decoder.discarded_lines(), 1);
    }

    #[test]
    fn non_utf8_bytes_are_kept_verbatim() {
        let mut decoder = LineDecoder::default();
        let lines = feed_all(&mut decoder, b"R:070.0R\xFF 032.4C\n");
        assert_eq!(lines, vec![b"R:070.0R\xFF 032.4C".to_vec()]);
    }
}
