pub const RECORD_MARKER: &[u8] = b"R:";

pub const HUMIDITY_RANGE: std::ops::Range<usize> = 2..7;
pub const TEMPERATURE_RANGE: std::ops::Range<usize> = 11..16;

/// Shortest line that still covers both numeric fields.
pub const MIN_LINE_LEN: usize = TEMPERATURE_RANGE.end;
pub const DEFAULT_MAX_LINE_LEN: usize = 100;

pub const LINE_FEED: u8 = b'\n';
pub const CARRIAGE_RETURN: u8 = b'\r';
