use tracing::{debug, warn};

use super::error::DecodeError;
use super::quality::build_reading_summary;
use super::stats::StatsAggregator;
use super::validate::RangeValidator;
use crate::config::Config;
use crate::protocols::line::{LineDecoder, LineRecord, parse_line_record};
use crate::quantity::{Quantity, Readings};
use crate::sink::TelemetrySink;
use crate::source::{ByteSource, SourceError};
use crate::{DecodeSummary, QuantitySummary, ReadingSummary};

/// Decode pipeline for the ASCII humidity/temperature link.
///
/// Bytes are assembled into lines, each line is one decode attempt, and
/// accepted records are folded into the statistics and published.
#[derive(Debug)]
pub struct LineMonitor {
    decoder: LineDecoder,
    validator: Option<RangeValidator>,
    stats: StatsAggregator,
    last_record: Option<LineRecord>,
}

impl LineMonitor {
    pub fn new(config: &Config) -> Self {
        let validator = config
            .line
            .validate_ranges
            .then(|| RangeValidator::new(config.limits.clone()));
        Self {
            decoder: LineDecoder::new(config.line.max_line_len),
            validator,
            stats: StatsAggregator::new(&Quantity::LINE),
            last_record: None,
        }
    }

    /// Drain every byte currently available and return the number of
    /// accepted records.
    pub fn poll<S, K>(&mut self, source: &mut S, sink: &mut K) -> Result<usize, SourceError>
    where
        S: ByteSource + ?Sized,
        K: TelemetrySink + ?Sized,
    {
        let mut accepted = 0;
        while source.available()? > 0 {
            let byte = source.read_byte()?;
            if let Some(line) = self.decoder.feed(byte) {
                if self.process_line(&line, sink).is_ok() {
                    accepted += 1;
                }
            }
        }
        Ok(accepted)
    }

    pub fn process_line<K>(&mut self, line: &[u8], sink: &mut K) -> Result<LineRecord, DecodeError>
    where
        K: TelemetrySink + ?Sized,
    {
        self.stats.record_attempt();
        match self.decode(line) {
            Ok(record) => {
                debug!(
                    humidity = record.humidity_percent,
                    temperature = record.temperature_celsius,
                    "line record accepted"
                );
                self.stats.accept_record(&record);
                for (quantity, value) in record.readings() {
                    sink.publish(quantity, value);
                }
                self.last_record = Some(record);
                Ok(record)
            }
            Err(err) => {
                self.stats.record_error(err.kind());
                match err {
                    DecodeError::UnrecognizedFormat { .. } => {
                        debug!(line = %String::from_utf8_lossy(line), "ignoring unrecognized line")
                    }
                    _ => warn!(
                        line = %String::from_utf8_lossy(line),
                        error = %err,
                        "dropping line record"
                    ),
                }
                Err(err)
            }
        }
    }

    fn decode(&self, line: &[u8]) -> Result<LineRecord, DecodeError> {
        let record = parse_line_record(line)?;
        if let Some(validator) = &self.validator {
            validator.validate(&record)?;
        }
        Ok(record)
    }

    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    pub fn last_record(&self) -> Option<&LineRecord> {
        self.last_record.as_ref()
    }

    pub fn discarded_lines(&self) -> u64 {
        self.decoder.discarded_lines()
    }

    pub fn reset(&mut self) {
        self.decoder.reset();
        self.stats.reset();
        self.last_record = None;
    }

    pub fn decode_summary(&self) -> DecodeSummary {
        self.stats
            .decode_summary(Some(self.decoder.discarded_lines()), None)
    }

    pub fn quantity_summaries(&self) -> Vec<QuantitySummary> {
        self.stats.quantity_summaries()
    }

    /// Line records carry no timestamp.
    pub fn last_reading(&self) -> Option<ReadingSummary> {
        self.last_record
            .as_ref()
            .map(|record| build_reading_summary(record, None))
    }
}
