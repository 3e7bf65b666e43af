use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::sink::TelemetrySink;
use crate::source::clock::{Clock, ManualClock};
use crate::source::{ByteSource, CaptureFileSource, SourceError};
use crate::{InputInfo, Report, make_stub_report};

pub mod error;
pub mod frame;
pub mod line;
pub mod quality;
pub mod stats;
pub mod validate;
mod window;

use frame::{CycleOutcome, FrameMonitor};
use line::LineMonitor;

const LINE_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Source error: {0}")]
    Source(#[from] SourceError),
}

/// Wire protocol of a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// ASCII humidity/temperature lines.
    Line,
    /// Binary 9-byte TVOC/CH2O/CO2 frames.
    Frame,
}

impl Protocol {
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Line => "line",
            Protocol::Frame => "frame",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode a raw capture file and build its report.
///
/// Replay runs on a [`ManualClock`], so burst timing and record timestamps
/// do not depend on how fast the file is read.
pub fn analyze_capture_file<K>(
    path: &Path,
    protocol: Protocol,
    config: &Config,
    sink: &mut K,
) -> Result<Report, AnalysisError>
where
    K: TelemetrySink + ?Sized,
{
    let source = CaptureFileSource::open(path)?;
    let input = InputInfo {
        path: path.display().to_string(),
        bytes: path.metadata()?.len(),
        protocol: protocol.as_str().to_string(),
    };
    let clock = ManualClock::new();
    analyze_source(input, protocol, source, &clock, config, sink)
}

/// Decode `source` until it closes. A source that never closes (a live
/// link) keeps this running.
pub fn analyze_source<S, C, K>(
    input: InputInfo,
    protocol: Protocol,
    mut source: S,
    clock: &C,
    config: &Config,
    sink: &mut K,
) -> Result<Report, AnalysisError>
where
    S: ByteSource,
    C: Clock + ?Sized,
    K: TelemetrySink + ?Sized,
{
    info!(path = %input.path, %protocol, "decoding capture");
    let mut report = make_stub_report(&input.path, input.bytes, protocol);

    match protocol {
        Protocol::Line => {
            let mut monitor = LineMonitor::new(config);
            loop {
                monitor.poll(&mut source, sink)?;
                if source.is_closed() {
                    break;
                }
                clock.pause(LINE_POLL_INTERVAL);
            }
            report.decode_summary = Some(monitor.decode_summary());
            report.quantities = monitor.quantity_summaries();
            report.last_reading = monitor.last_reading();
        }
        Protocol::Frame => {
            let mut monitor = FrameMonitor::new(config);
            while let CycleOutcome::Decoded(_) = monitor.poll_cycle(&mut source, clock, sink)? {}
            report.decode_summary = Some(monitor.decode_summary());
            report.quantities = monitor.quantity_summaries();
            report.last_reading = monitor.last_reading();
        }
    }

    if let Some(summary) = &report.decode_summary {
        info!(
            attempts = summary.attempts,
            valid = summary.valid,
            errors = summary.errors,
            "decode finished"
        );
    }
    Ok(report)
}
