//! sensorwire core library for decoding serial sensor telemetry.
//!
//! Two wire protocols are supported: ASCII humidity/temperature lines and
//! 9-byte binary TVOC/CH2O/CO2 frames. Byte sources feed the analysis layer,
//! which drives the protocol decoders (layout/reader/parser), validates
//! readings, publishes them to a telemetry sink and aggregates running
//! statistics into a deterministic report. Decoding is side-effect free; I/O
//! stays in `source` and timing behind the `Clock` trait.
//!
//! Invariants:
//! - A failed record never aborts decoding; it is counted and dropped.
//! - Statistics are append-only until an explicit reset.
//! - Report outputs are deterministic for a given capture and config.
//!
//! # Examples
//! ```no_run
//! use std::path::Path;
//!
//! use sensorwire_core::{Config, NullSink, Protocol, analyze_capture_file};
//!
//! let report = analyze_capture_file(
//!     Path::new("frames.bin"),
//!     Protocol::Frame,
//!     &Config::default(),
//!     &mut NullSink,
//! )?;
//! println!("report version: {}", report.report_version);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod analysis;
pub mod config;
pub mod protocols;
pub mod quantity;
pub mod sink;
pub mod source;

pub use analysis::error::{DecodeError, ErrorKind};
pub use analysis::frame::{CycleOutcome, FrameMonitor};
pub use analysis::line::LineMonitor;
pub use analysis::quality::{Grade, grade};
pub use analysis::stats::{RunningStats, StatsAggregator};
pub use analysis::validate::{RangeError, RangeValidator};
pub use analysis::{AnalysisError, Protocol, analyze_capture_file, analyze_source};
pub use config::{Bounds, Config, ConfigError, FrameConfig, LineConfig, RangeLimits};
pub use quantity::{Quantity, Readings};
pub use sink::{NullSink, TelemetrySink};
pub use source::{ByteSource, CaptureFileSource, MemorySource, SourceError};

/// Current report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Placeholder timestamp; the CLI replaces it with the generation time.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// Decode report for one capture.
///
/// # Examples
/// ```
/// use sensorwire_core::{Protocol, make_stub_report};
///
/// let report = make_stub_report("frames.bin", 123, Protocol::Frame);
/// assert_eq!(report.report_version, sensorwire_core::REPORT_VERSION);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    pub tool: ToolInfo,
    /// RFC3339 timestamp of report generation.
    pub generated_at: String,

    pub input: InputInfo,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode_summary: Option<DecodeSummary>,
    /// Per-quantity statistics in wire order.
    pub quantities: Vec<QuantitySummary>,
    /// Most recent accepted record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reading: Option<ReadingSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    /// Tool name ("sensorwire").
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input capture metadata embedded in reports.
///
/// # Examples
/// ```
/// use sensorwire_core::InputInfo;
///
/// let input = InputInfo {
///     path: "climate.log".to_string(),
///     bytes: 1024,
///     protocol: "line".to_string(),
/// };
/// assert_eq!(input.bytes, 1024);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the analyzer.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
    /// Wire protocol used to decode the input (`line` or `frame`).
    pub protocol: String,
}

/// Record-level decode counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodeSummary {
    /// Decode attempts (lines, frames, empty bursts and timeouts).
    pub attempts: u64,
    pub valid: u64,
    pub errors: u64,
    /// `valid / attempts`, absent when nothing was attempted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_rate: Option<f64>,
    /// Accepted frames whose checksum byte did not match.
    pub checksum_mismatches: u64,
    /// Overlong lines dropped before a terminator (line protocol only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discarded_lines: Option<u64>,
    /// Bytes dropped from the frame window (frame protocol only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped_bytes: Option<u64>,
    /// Error counts sorted by kind.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors_by_kind: Vec<ErrorCount>,
}

/// Number of failures of one kind, e.g. `out_of_range`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorCount {
    pub kind: String,
    pub count: u64,
}

/// Running statistics for one quantity.
///
/// # Examples
/// ```
/// use sensorwire_core::QuantitySummary;
///
/// let summary = QuantitySummary {
///     quantity: "tvoc".to_string(),
///     unit: "mg/m³".to_string(),
///     valid_count: 0,
///     total_count: 2,
///     error_count: 2,
///     min: None,
///     max: None,
///     mean: None,
/// };
/// assert!(summary.mean.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantitySummary {
    pub quantity: String,
    pub unit: String,
    pub valid_count: u64,
    pub total_count: u64,
    pub error_count: u64,
    /// Extremes and mean are absent until a value has been accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
}

/// Values of the last accepted record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingSummary {
    /// Monitor clock time in ms (frame protocol only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<u64>,
    pub values: Vec<ReadingValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingValue {
    pub quantity: String,
    pub unit: String,
    pub value: f64,
    /// Air-quality grade, for concentrations only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

/// Build a stub report with base fields filled and empty aggregates.
///
/// # Examples
/// ```
/// use sensorwire_core::{Protocol, make_stub_report};
///
/// let report = make_stub_report("climate.log", 64, Protocol::Line);
/// assert_eq!(report.input.protocol, "line");
/// assert!(report.quantities.is_empty());
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64, protocol: Protocol) -> Report {
    Report {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "sensorwire".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
            protocol: protocol.as_str().to_string(),
        },
        decode_summary: None,
        quantities: vec![],
        last_reading: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_omits_optional_fields_when_none() {
        let mut report = make_stub_report("frames.bin", 9, Protocol::Frame);
        report.decode_summary = Some(DecodeSummary {
            attempts: 0,
            valid: 0,
            errors: 0,
            success_rate: None,
            checksum_mismatches: 0,
            discarded_lines: None,
            dropped_bytes: None,
            errors_by_kind: vec![],
        });
        report.quantities = vec![QuantitySummary {
            quantity: "co2".to_string(),
            unit: "mg/m³".to_string(),
            valid_count: 0,
            total_count: 0,
            error_count: 0,
            min: None,
            max: None,
            mean: None,
        }];
        report.last_reading = Some(ReadingSummary {
            timestamp_ms: None,
            values: vec![ReadingValue {
                quantity: "humidity".to_string(),
                unit: "%RH".to_string(),
                value: 50.0,
                grade: None,
            }],
        });

        let value = serde_json::to_value(&report).expect("report json");
        let summary = value.get("decode_summary").expect("decode_summary");
        assert!(summary.get("success_rate").is_none());
        assert!(summary.get("discarded_lines").is_none());
        assert!(summary.get("errors_by_kind").is_none());

        let quantity = &value["quantities"][0];
        assert!(quantity.get("min").is_none());
        assert!(quantity.get("mean").is_none());

        let reading = &value["last_reading"];
        assert!(reading.get("timestamp_ms").is_none());
        assert!(reading["values"][0].get("grade").is_none());
    }

    #[test]
    fn stub_report_has_no_decode_summary() {
        let report = make_stub_report("climate.log", 0, Protocol::Line);
        let value = serde_json::to_value(&report).expect("report json");
        assert!(value.get("decode_summary").is_none());
        assert!(value.get("last_reading").is_none());
        assert_eq!(value["tool"]["name"], "sensorwire");
    }
}
