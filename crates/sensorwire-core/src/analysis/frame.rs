use tracing::{debug, warn};

use super::error::DecodeError;
use super::quality::build_reading_summary;
use super::stats::StatsAggregator;
use super::validate::RangeValidator;
use super::window::FrameWindow;
use crate::config::Config;
use crate::protocols::frame::{FrameRecord, SensorFrame, parse_frame};
use crate::quantity::{Quantity, Readings};
use crate::sink::TelemetrySink;
use crate::source::burst::{Burst, BurstReader};
use crate::source::clock::Clock;
use crate::source::{ByteSource, SourceError};
use crate::{DecodeSummary, QuantitySummary, ReadingSummary};

/// Result of one bounded read cycle.
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// Every frame decoded from the burst, or the single error that ended
    /// a cycle without one.
    Decoded(Vec<Result<FrameRecord, DecodeError>>),
    /// The source is closed and drained.
    Closed,
}

/// Decode pipeline for the binary TVOC/CH2O/CO2 link.
#[derive(Debug)]
pub struct FrameMonitor {
    reader: BurstReader,
    window: FrameWindow,
    validator: RangeValidator,
    strict_checksum: bool,
    stats: StatsAggregator,
    last_record: Option<FrameRecord>,
}

impl FrameMonitor {
    pub fn new(config: &Config) -> Self {
        Self {
            reader: BurstReader::from_config(&config.frame),
            window: FrameWindow::new(config.frame.window_capacity),
            validator: RangeValidator::new(config.limits.clone()),
            strict_checksum: config.frame.strict_checksum,
            stats: StatsAggregator::new(&Quantity::FRAME),
            last_record: None,
        }
    }

    /// Read one burst (bounded by the frame timeout) and decode it.
    pub fn poll_cycle<S, C, K>(
        &mut self,
        source: &mut S,
        clock: &C,
        sink: &mut K,
    ) -> Result<CycleOutcome, SourceError>
    where
        S: ByteSource + ?Sized,
        C: Clock + ?Sized,
        K: TelemetrySink + ?Sized,
    {
        match self.reader.read(source, clock)? {
            Burst::Closed => Ok(CycleOutcome::Closed),
            Burst::TimedOut { waited } => {
                self.window.clear();
                let waited_ms = u64::try_from(waited.as_millis()).unwrap_or(u64::MAX);
                debug!(waited_ms, "no frame before timeout");
                let err = DecodeError::Timeout { waited_ms };
                self.stats.record_attempt();
                self.stats.record_error(err.kind());
                Ok(CycleOutcome::Decoded(vec![Err(err)]))
            }
            Burst::Bytes(bytes) => Ok(CycleOutcome::Decoded(self.process_burst(
                &bytes,
                clock.now_ms(),
                sink,
            ))),
        }
    }

    /// Append a burst to the byte window and decode every complete frame in
    /// it. A burst yielding no frame counts as one failed attempt; leftover
    /// bytes after decoded frames stay in the window for the next burst.
    pub fn process_burst<K>(
        &mut self,
        bytes: &[u8],
        timestamp: u64,
        sink: &mut K,
    ) -> Vec<Result<FrameRecord, DecodeError>>
    where
        K: TelemetrySink + ?Sized,
    {
        self.window.extend(bytes);
        let mut results = Vec::new();
        loop {
            match self.window.next_frame() {
                Ok(frame) => results.push(self.process_frame(&frame, timestamp, sink)),
                Err(err) => {
                    if results.is_empty() {
                        let err = DecodeError::from(err);
                        debug!(error = %err, "burst without a frame");
                        self.stats.record_attempt();
                        self.stats.record_error(err.kind());
                        results.push(Err(err));
                    }
                    break;
                }
            }
        }
        results
    }

    pub fn process_frame<K>(
        &mut self,
        frame: &SensorFrame,
        timestamp: u64,
        sink: &mut K,
    ) -> Result<FrameRecord, DecodeError>
    where
        K: TelemetrySink + ?Sized,
    {
        self.stats.record_attempt();
        match self.decode(frame, timestamp) {
            Ok(record) => {
                debug!(
                    tvoc = record.tvoc_mg_m3,
                    ch2o = record.ch2o_mg_m3,
                    co2 = record.co2_mg_m3,
                    "frame record accepted"
                );
                if !record.checksum_ok() {
                    self.stats.record_checksum_mismatch();
                }
                self.stats.accept_record(&record);
                for (quantity, value) in record.readings() {
                    sink.publish(quantity, value);
                }
                self.last_record = Some(record);
                Ok(record)
            }
            Err(err) => {
                warn!(error = %err, "dropping frame record");
                self.stats.record_error(err.kind());
                Err(err)
            }
        }
    }

    fn decode(&self, frame: &SensorFrame, timestamp: u64) -> Result<FrameRecord, DecodeError> {
        let record = parse_frame(frame, timestamp);
        if self.strict_checksum {
            if let Some(mismatch) = record.checksum_mismatch {
                return Err(mismatch.into());
            }
        }
        self.validator.validate(&record)?;
        Ok(record)
    }

    pub fn stats(&self) -> &StatsAggregator {
        &self.stats
    }

    pub fn last_record(&self) -> Option<&FrameRecord> {
        self.last_record.as_ref()
    }

    pub fn dropped_bytes(&self) -> u64 {
        self.window.dropped_bytes()
    }

    pub fn reset(&mut self) {
        self.window.reset();
        self.stats.reset();
        self.last_record = None;
    }

    pub fn decode_summary(&self) -> DecodeSummary {
        self.stats
            .decode_summary(None, Some(self.window.dropped_bytes()))
    }

    pub fn quantity_summaries(&self) -> Vec<QuantitySummary> {
        self.stats.quantity_summaries()
    }

    pub fn last_reading(&self) -> Option<ReadingSummary> {
        self.last_record
            .as_ref()
            .map(|record| build_reading_summary(record, Some(record.timestamp)))
    }
}
