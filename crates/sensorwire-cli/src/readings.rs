use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use sensorwire_core::{Quantity, TelemetrySink};
use serde::Serialize;

#[derive(Serialize)]
struct ReadingLine {
    quantity: Quantity,
    unit: &'static str,
    value: f32,
}

/// Telemetry sink writing one JSON object per published value.
///
/// Publishing cannot fail, so the first write error is kept and returned
/// by [`JsonLinesSink::finish`].
pub struct JsonLinesSink {
    writer: BufWriter<File>,
    written: u64,
    error: Option<io::Error>,
}

impl JsonLinesSink {
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self {
            writer: BufWriter::new(File::create(path)?),
            written: 0,
            error: None,
        })
    }

    /// Flush and return the number of lines written.
    pub fn finish(mut self) -> io::Result<u64> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        self.writer.flush()?;
        Ok(self.written)
    }

    fn write_line(&mut self, quantity: Quantity, value: f32) -> io::Result<()> {
        let line = ReadingLine {
            quantity,
            unit: quantity.unit(),
            value,
        };
        serde_json::to_writer(&mut self.writer, &line)?;
        self.writer.write_all(b"\n")
    }
}

impl TelemetrySink for JsonLinesSink {
    fn publish(&mut self, quantity: Quantity, value: f32) {
        if self.error.is_some() {
            return;
        }
        match self.write_line(quantity, value) {
            Ok(()) => self.written += 1,
            Err(err) => self.error = Some(err),
        }
    }
}
