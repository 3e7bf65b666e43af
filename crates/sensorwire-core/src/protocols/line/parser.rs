use serde::Serialize;

use super::error::LineError;
use super::layout;
use super::reader::LineReader;
use crate::quantity::{Quantity, Readings};

/// Temperature/humidity pair decoded from one ASCII line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LineRecord {
    pub humidity_percent: f32,
    pub temperature_celsius: f32,
}

impl Readings for LineRecord {
    fn readings(&self) -> Vec<(Quantity, f32)> {
        vec![
            (Quantity::Humidity, self.humidity_percent),
            (Quantity::Temperature, self.temperature_celsius),
        ]
    }
}

/// Parse a completed line of the form `R:HHH.HRH TTT.TC`.
///
/// Lines without the record marker, or too short to hold both fields, are
/// rejected before any numeric parsing happens.
pub fn parse_line_record(line: &[u8]) -> Result<LineRecord, LineError> {
    let reader = LineReader::new(line);
    reader.require_record()?;

    let humidity_percent = reader.read_decimal("humidity", layout::HUMIDITY_RANGE)?;
    let temperature_celsius = reader.read_decimal("temperature", layout::TEMPERATURE_RANGE)?;

    Ok(LineRecord {
        humidity_percent,
        temperature_celsius,
    })
}
